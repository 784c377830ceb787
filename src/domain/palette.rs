// Series colors, cycled by series index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

const PALETTE: [Rgb; 8] = [
    Rgb(54, 162, 235),
    Rgb(255, 99, 132),
    Rgb(75, 192, 192),
    Rgb(255, 159, 64),
    Rgb(153, 102, 255),
    Rgb(255, 205, 86),
    Rgb(201, 203, 207),
    Rgb(46, 139, 87),
];

impl Rgb {
    pub fn for_index(index: usize) -> Self {
        PALETTE[index % PALETTE.len()]
    }

    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }

    pub fn css_alpha(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(Rgb::for_index(0), Rgb::for_index(PALETTE.len()));
        assert_ne!(Rgb::for_index(0), Rgb::for_index(1));
    }

    #[test]
    fn test_css() {
        let color = Rgb(1, 2, 3);
        assert_eq!(color.css(), "rgb(1, 2, 3)");
        assert_eq!(color.css_alpha(0.1), "rgba(1, 2, 3, 0.1)");
    }
}
