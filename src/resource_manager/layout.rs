use crate::backend::ElementKind;


/// A scalar type that can appear as a component of a vertex attribute.
pub trait VertexElement {
	const KIND: ElementKind;
	const NORMALIZED: bool;
}

impl VertexElement for f32 {
	const KIND: ElementKind = ElementKind::Float;
	const NORMALIZED: bool = false;
}

impl VertexElement for u32 {
	const KIND: ElementKind = ElementKind::UnsignedInt;
	const NORMALIZED: bool = false;
}

impl VertexElement for u8 {
	const KIND: ElementKind = ElementKind::UnsignedByte;
	const NORMALIZED: bool = true;
}


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
	pub kind: ElementKind,
	pub count: u32,
	pub normalized: bool,
	/// Byte offset from the start of a vertex.
	pub offset: u32,
}

impl VertexAttribute {
	pub fn size(&self) -> u32 {
		self.count * self.kind.size()
	}
}


/// Interleaved vertex format. Attributes are assigned slots in push order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct VertexBufferLayout {
	attributes: Vec<VertexAttribute>,
	stride: u32,
}

impl VertexBufferLayout {
	pub fn new() -> VertexBufferLayout {
		VertexBufferLayout::default()
	}

	pub fn push<T: VertexElement>(&mut self, count: u32) -> &mut Self {
		assert!((1..=4).contains(&count), "vertex attributes have 1 to 4 components, got {count}");

		let attribute = VertexAttribute {
			kind: T::KIND,
			count,
			normalized: T::NORMALIZED,
			offset: self.stride,
		};

		self.stride += attribute.size();
		self.attributes.push(attribute);
		self
	}

	pub fn attributes(&self) -> &[VertexAttribute] {
		&self.attributes
	}

	pub fn stride(&self) -> u32 {
		self.stride
	}
}
