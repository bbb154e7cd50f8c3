use super::bounds::Bounds;
use super::projectile::Projectile;

/// Movement keys held during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Movement {
    pub const RIGHT: Movement = Movement {
        up: false,
        down: false,
        left: false,
        right: true,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, size: f32, speed: f32) -> Self {
        Self {
            x,
            y,
            width: size,
            height: size,
            speed,
        }
    }

    /// A player placed in the middle of a `field_width` x `field_height` field
    pub fn centered(field_width: f32, field_height: f32, size: f32, speed: f32) -> Self {
        Self::new(
            field_width / 2.0 - size / 2.0,
            field_height / 2.0 - size / 2.0,
            size,
            speed,
        )
    }

    /// Applies every held direction, then clamps the ship inside the field
    pub fn apply_movement(&mut self, movement: Movement, field_width: f32, field_height: f32) {
        if movement.up {
            self.y -= self.speed;
        }
        if movement.down {
            self.y += self.speed;
        }
        if movement.left {
            self.x -= self.speed;
        }
        if movement.right {
            self.x += self.speed;
        }

        self.x = self.x.min(field_width - self.width).max(0.0);
        self.y = self.y.min(field_height - self.height).max(0.0);
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// Fires a broadside: one shot leftward from the port edge and one
    /// rightward from the starboard edge, both at mid height
    pub fn fire(&self, projectile_speed: f32) -> [Projectile; 2] {
        let mid_y = self.y + self.height / 2.0;
        [
            Projectile::new(self.x, mid_y, -projectile_speed),
            Projectile::new(self.x + self.width, mid_y, projectile_speed),
        ]
    }
}
