use super::element::Element;

/// Cartesian vector in Å (positions) or energy/Å (forces).
pub type Vec3 = [f64; 3];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    pub element: Element,
    pub position: Vec3,
}

impl Atom {
    pub fn new(element: Element, position: Vec3) -> Self {
        Self { element, position }
    }
}
