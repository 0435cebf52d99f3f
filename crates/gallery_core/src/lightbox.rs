/// Default slide dimensions handed to the lightbox widget.
pub const SLIDE_WIDTH: u32 = 1920;
pub const SLIDE_HEIGHT: u32 = 1080;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub src: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

/// Builds the slide list the lightbox widget renders for `view`.
pub fn slides(view: &[&str]) -> Vec<Slide> {
    view.iter()
        .enumerate()
        .map(|(i, src)| Slide {
            src: (*src).to_string(),
            alt: format!("Image {}", i + 1),
            width: SLIDE_WIDTH,
            height: SLIDE_HEIGHT,
        })
        .collect()
}

/// Focused-image state over the filtered view. While open, `index` is always
/// a valid position in a list of the length last passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lightbox {
    open: bool,
    index: usize,
}

impl Lightbox {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn index(&self) -> Option<usize> {
        self.open.then_some(self.index)
    }

    pub fn current<'a>(&self, view: &[&'a str]) -> Option<&'a str> {
        self.index().and_then(|i| view.get(i).copied())
    }

    pub fn open(&mut self, at: usize, len: usize) -> bool {
        if at >= len {
            return false;
        }
        self.open = true;
        self.index = at;
        true
    }

    /// Moves to `at` while open, e.g. when the widget reports a swipe.
    pub fn jump(&mut self, at: usize, len: usize) -> bool {
        if !self.open || at >= len {
            return false;
        }
        self.index = at;
        true
    }

    pub fn close(&mut self) {
        self.open = false;
        self.index = 0;
    }

    /// Cyclic step; no-op when closed or the list is empty.
    pub fn step(&mut self, direction: Direction, len: usize) -> bool {
        if !self.open || len == 0 {
            return false;
        }
        self.index = match direction {
            Direction::Previous => (self.index + len - 1) % len,
            Direction::Next => (self.index + 1) % len,
        };
        true
    }

    /// Keyboard handling; keys are ignored while closed.
    pub fn handle_key(&mut self, key: Key, len: usize) -> bool {
        if !self.open {
            return false;
        }
        match key {
            Key::Escape => {
                self.close();
                true
            }
            Key::ArrowLeft => self.step(Direction::Previous, len),
            Key::ArrowRight => self.step(Direction::Next, len),
            Key::Other => false,
        }
    }

    /// Keeps the index valid after the filtered list changed length.
    pub fn reconcile(&mut self, len: usize) {
        if !self.open {
            return;
        }
        if len == 0 {
            self.close();
        } else if self.index >= len {
            self.index = len - 1;
        }
    }
}
