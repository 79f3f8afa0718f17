use crate::motion::clamp_unit;

pub const DEFAULT_CURSOR_EASING: f64 = 0.1;
pub const DEFAULT_TILT_MAX_DEGREES: f64 = 8.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Custom cursor that trails the pointer with exponential smoothing.
#[derive(Clone, Debug, PartialEq)]
pub struct CursorFollower {
    target: Point,
    rendered: Point,
    easing: f64,
    visible: bool,
    hovering: bool,
    pressed: bool,
}

impl CursorFollower {
    pub fn new(easing: f64) -> Self {
        Self {
            target: Point::default(),
            rendered: Point::default(),
            easing: easing.clamp(0.01, 1.0),
            visible: false,
            hovering: false,
            pressed: false,
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.target = Point::new(x, y);
        self.visible = true;
    }

    /// One easing step; call once per frame.
    pub fn step(&mut self) -> Point {
        self.rendered.x += (self.target.x - self.rendered.x) * self.easing;
        self.rendered.y += (self.target.y - self.rendered.y) * self.easing;
        self.rendered
    }

    /// Hides the cursor and drops any press; a release outside the page is never delivered.
    pub fn leave_viewport(&mut self) {
        self.visible = false;
        self.hovering = false;
        self.pressed = false;
    }

    pub fn enter_viewport(&mut self) {
        self.visible = true;
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    #[cfg(test)]
    fn target(&self) -> Point {
        self.target
    }

    pub fn rendered(&self) -> Point {
        self.rendered
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn opacity(&self) -> f64 {
        if self.visible {
            1.0
        } else {
            0.0
        }
    }

    pub fn transform(&self) -> String {
        format!(
            "translate3d({:.2}px, {:.2}px, 0)",
            self.rendered.x, self.rendered.y
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    pub fn transform(&self) -> String {
        format!(
            "perspective(1000px) rotateX({:.2}deg) rotateY({:.2}deg)",
            self.rotate_x, self.rotate_y
        )
    }
}

/// Rotation for a pointer at `pointer` over a box at `origin` of `width` x `height`.
pub fn tilt_for(pointer: Point, origin: Point, width: f64, height: f64, max_degrees: f64) -> Tilt {
    if width <= 0.0 || height <= 0.0 {
        return Tilt {
            rotate_x: 0.0,
            rotate_y: 0.0,
        };
    }

    let nx = clamp_unit((pointer.x - origin.x) / width);
    let ny = clamp_unit((pointer.y - origin.y) / height);

    Tilt {
        rotate_x: (0.5 - ny) * 2.0 * max_degrees,
        rotate_y: (nx - 0.5) * 2.0 * max_degrees,
    }
}
