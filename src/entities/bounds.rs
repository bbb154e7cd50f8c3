/// Axis-aligned box in playfield units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when the point lies strictly inside; a point on an edge is outside
    pub fn contains_strict(&self, x: f32, y: f32) -> bool {
        x > self.x && x < self.right() && y > self.y && y < self.bottom()
    }

    /// Inclusive box overlap test. Boxes that share an edge overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_inside_enemy_box() {
        let enemy = Bounds::new(50.0, 50.0, 64.0, 64.0);
        assert!(enemy.contains_strict(60.0, 70.0));
    }

    #[test]
    fn test_point_on_edge_is_outside() {
        let enemy = Bounds::new(50.0, 50.0, 64.0, 64.0);
        assert!(!enemy.contains_strict(50.0, 70.0));
        assert!(!enemy.contains_strict(114.0, 70.0));
        assert!(!enemy.contains_strict(60.0, 50.0));
        assert!(!enemy.contains_strict(60.0, 114.0));
    }

    #[test]
    fn test_boxes_overlap() {
        let player = Bounds::new(100.0, 100.0, 128.0, 128.0);
        let enemy = Bounds::new(200.0, 150.0, 64.0, 64.0);
        assert!(player.overlaps(&enemy));
        assert!(enemy.overlaps(&player));
    }

    #[test]
    fn test_touching_boxes_overlap() {
        let player = Bounds::new(100.0, 100.0, 128.0, 128.0);
        let beside = Bounds::new(228.0, 100.0, 64.0, 64.0);
        let below = Bounds::new(120.0, 228.0, 64.0, 64.0);
        assert!(player.overlaps(&beside));
        assert!(player.overlaps(&below));
    }

    #[test]
    fn test_separated_boxes_do_not_overlap() {
        let player = Bounds::new(100.0, 100.0, 128.0, 128.0);
        let enemy = Bounds::new(228.5, 100.0, 64.0, 64.0);
        assert!(!player.overlaps(&enemy));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_overlap_is_symmetric(
                ax in -100f32..900.0, ay in -100f32..700.0,
                bx in -100f32..900.0, by in -100f32..700.0,
                aw in 1f32..200.0, bw in 1f32..200.0
            ) {
                let a = Bounds::new(ax, ay, aw, aw);
                let b = Bounds::new(bx, by, bw, bw);
                prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
            }
        }
    }
}
