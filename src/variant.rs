use nalgebra::Vector2;
use std::fmt;

/// A tagged value carried between node slots.
///
/// `Nil` means "no value"; it is what empty slots resolve to and what makes
/// an input fall through to its instruction default.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Variant {
    Nil,
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(Vector2<f32>),
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Nil
    }
}

impl Variant {
    pub fn vec2(x: f32, y: f32) -> Self {
        Variant::Vec2(Vector2::new(x, y))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Variant::Nil)
    }

    /// Total coercion to float. Vectors collapse to their x component.
    pub fn as_float(&self) -> f32 {
        match self {
            Variant::Nil => 0.0,
            Variant::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Variant::Int(i) => *i as f32,
            Variant::Float(f) => *f,
            Variant::Vec2(v) => v.x,
        }
    }

    /// Total coercion to int. Floats truncate.
    pub fn as_int(&self) -> i32 {
        match self {
            Variant::Nil => 0,
            Variant::Bool(b) => *b as i32,
            Variant::Int(i) => *i,
            Variant::Float(f) => *f as i32,
            Variant::Vec2(v) => v.x as i32,
        }
    }

    pub fn as_bool(&self) -> bool {
        self.as_int() != 0
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Variant::Nil => "nil",
            Variant::Bool(_) => "bool",
            Variant::Int(_) => "int",
            Variant::Float(_) => "float",
            Variant::Vec2(_) => "vec2",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Variant::Nil => write!(f, "nil"),
            Variant::Bool(b) => write!(f, "{}", b),
            Variant::Int(i) => write!(f, "{}", i),
            Variant::Float(v) => write!(f, "{}", v),
            Variant::Vec2(v) => write!(f, "({}, {})", v.x, v.y),
        }
    }
}
