use super::bounds::Bounds;

/// Side of the field an enemy sails in from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub width: f32,
    pub height: f32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, vx: f32, size: f32) -> Self {
        Self {
            x,
            y,
            vx,
            width: size,
            height: size,
        }
    }

    /// An enemy one ship-length beyond the `side` edge, heading inward
    pub fn entering_from(side: Side, y: f32, field_width: f32, size: f32, speed: f32) -> Self {
        match side {
            Side::Left => Self::new(-size, y, speed, size),
            Side::Right => Self::new(field_width + size, y, -speed, size),
        }
    }

    pub fn update(&mut self) {
        self.x += self.vx;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// True once the ship has sailed completely past the far edge.
    /// Enemies waiting beyond their entry edge are not considered gone.
    pub fn has_crossed(&self, field_width: f32) -> bool {
        if self.vx > 0.0 {
            self.x > field_width
        } else if self.vx < 0.0 {
            self.x + self.width < 0.0
        } else {
            false
        }
    }
}
