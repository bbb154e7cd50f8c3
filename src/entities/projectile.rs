/// A cannonball travelling horizontally across the field
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
}

impl Projectile {
    pub fn new(x: f32, y: f32, vx: f32) -> Self {
        Self { x, y, vx }
    }

    pub fn update(&mut self) {
        self.x += self.vx;
    }

    /// Out once x leaves [0, field_width]; both ends are still in bounds
    pub fn is_out_of_bounds(&self, field_width: f32) -> bool {
        self.x < 0.0 || self.x > field_width
    }
}
