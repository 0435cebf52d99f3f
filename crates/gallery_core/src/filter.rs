use std::fmt;

/// The closed set of image types the gallery knows how to filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageExtension {
    Jpg,
    Png,
    Gif,
    Webp,
    Svg,
    Bmp,
    Tiff,
}

impl ImageExtension {
    pub const ALL: [ImageExtension; 7] = [
        ImageExtension::Jpg,
        ImageExtension::Png,
        ImageExtension::Gif,
        ImageExtension::Webp,
        ImageExtension::Svg,
        ImageExtension::Bmp,
        ImageExtension::Tiff,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ImageExtension::Jpg => "jpg",
            ImageExtension::Png => "png",
            ImageExtension::Gif => "gif",
            ImageExtension::Webp => "webp",
            ImageExtension::Svg => "svg",
            ImageExtension::Bmp => "bmp",
            ImageExtension::Tiff => "tiff",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        let lowered = suffix.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|ext| ext.as_str() == lowered.as_str())
    }

    /// Classifies a URL by the text after its final `.`.
    ///
    /// The whole string is considered, so `a.jpg?w=1` yields the suffix
    /// `jpg?w=1` and is not recognized.
    pub fn of_url(url: &str) -> Option<Self> {
        let (_, suffix) = url.rsplit_once('.')?;
        Self::from_suffix(suffix)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ImageExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-extension inclusion flags. Every known extension always has a flag;
/// URLs of any other type are never admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionFilter {
    included: [bool; ImageExtension::ALL.len()],
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self {
            included: [true; ImageExtension::ALL.len()],
        }
    }
}

impl ExtensionFilter {
    pub fn none() -> Self {
        Self {
            included: [false; ImageExtension::ALL.len()],
        }
    }

    pub fn only(extensions: &[ImageExtension]) -> Self {
        let mut filter = Self::none();
        for ext in extensions {
            filter.set(*ext, true);
        }
        filter
    }

    pub fn set(&mut self, extension: ImageExtension, included: bool) {
        self.included[extension.slot()] = included;
    }

    pub fn toggle(&mut self, extension: ImageExtension) {
        let slot = extension.slot();
        self.included[slot] = !self.included[slot];
    }

    pub fn is_included(&self, extension: ImageExtension) -> bool {
        self.included[extension.slot()]
    }

    pub fn admits(&self, url: &str) -> bool {
        ImageExtension::of_url(url).is_some_and(|ext| self.is_included(ext))
    }

    pub fn entries(&self) -> impl Iterator<Item = (ImageExtension, bool)> + '_ {
        ImageExtension::ALL
            .into_iter()
            .map(|ext| (ext, self.is_included(ext)))
    }
}

#[cfg(test)]
mod tests {
    use super::{ExtensionFilter, ImageExtension};

    #[test]
    fn suffix_match_ignores_case() {
        assert_eq!(ImageExtension::of_url("c.JPG"), Some(ImageExtension::Jpg));
        assert_eq!(
            ImageExtension::of_url("https://cdn.example.com/x/pic.WebP"),
            Some(ImageExtension::Webp)
        );
    }

    #[test]
    fn unknown_or_missing_suffix_is_unrecognized() {
        assert_eq!(ImageExtension::of_url("https://example.com/photo.jpeg"), None);
        assert_eq!(ImageExtension::of_url("no-dot-here"), None);
        assert_eq!(ImageExtension::of_url("https://example.com/a.jpg?w=300"), None);
    }

    #[test]
    fn only_admits_selected_types() {
        let filter = ExtensionFilter::only(&[ImageExtension::Jpg]);
        assert!(filter.admits("a.jpg"));
        assert!(filter.admits("c.JPG"));
        assert!(!filter.admits("b.png"));
        assert!(!filter.admits("https://example.com/avatar"));
    }

    #[test]
    fn toggle_flips_a_single_flag() {
        let mut filter = ExtensionFilter::default();
        filter.toggle(ImageExtension::Gif);
        let excluded: Vec<_> = filter
            .entries()
            .filter(|(_, included)| !included)
            .map(|(ext, _)| ext)
            .collect();
        assert_eq!(excluded, vec![ImageExtension::Gif]);
    }
}
