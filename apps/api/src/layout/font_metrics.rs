//! Static font-metric tables for the PDF base-14 families used by export.
//!
//! Widths are in thousandths of an em, taken from the standard AFM files for
//! Helvetica, Times and Courier. Tables cover ASCII 0x20..=0x7E (95 printable
//! characters); index = (char as usize) - 32. Anything else falls back to
//! `average_width`.
//!
//! Web fonts named by templates are mapped onto one of the three classes by
//! name, so wrapping is an approximation of the preview, never exact.

use serde::Serialize;

// ────────────────────────────────────────────────────────────────────────────
// Font class
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontClass {
    Sans,
    Serif,
    Mono,
}

const MONO_HINTS: [&str; 6] = ["mono", "code", "courier", "consolas", "menlo", "inconsolata"];
const SERIF_HINTS: [&str; 9] = [
    "serif",
    "garamond",
    "georgia",
    "times",
    "merriweather",
    "playfair",
    "lora",
    "baskerville",
    "cormorant",
];

impl FontClass {
    /// Classifies a font family name. Unknown names are sans.
    pub fn classify(font_name: &str) -> Self {
        let name = font_name.to_ascii_lowercase();
        if MONO_HINTS.iter().any(|h| name.contains(h)) {
            FontClass::Mono
        } else if name.contains("sans") {
            FontClass::Sans
        } else if SERIF_HINTS.iter().any(|h| name.contains(h)) {
            FontClass::Serif
        } else {
            FontClass::Sans
        }
    }

    /// PDF base-14 font name.
    pub fn base_font(self, bold: bool) -> &'static str {
        match (self, bold) {
            (FontClass::Sans, false) => "Helvetica",
            (FontClass::Sans, true) => "Helvetica-Bold",
            (FontClass::Serif, false) => "Times-Roman",
            (FontClass::Serif, true) => "Times-Bold",
            (FontClass::Mono, false) => "Courier",
            (FontClass::Mono, true) => "Courier-Bold",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    class: FontClass,
    bold: bool,
    widths: [u16; 95],
    /// Fallback for characters outside 0x20..=0x7E.
    average_width: u16,
}

impl FontMetricTable {
    /// Base-14 font these widths were taken from.
    pub fn base_font(&self) -> &'static str {
        self.class.base_font(self.bold)
    }

    /// Rendered width of a string in em units.
    pub fn measure_em(&self, s: &str) -> f32 {
        let thousandths: u32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32] as u32
                } else {
                    self.average_width as u32
                }
            })
            .sum();
        thousandths as f32 / 1000.0
    }

    /// Rendered width of a string at `size` (same unit as the result).
    pub fn measure(&self, s: &str, size: f32) -> f32 {
        self.measure_em(s) * size
    }

    pub fn space_em(&self) -> f32 {
        self.widths[0] as f32 / 1000.0
    }

    /// Greedy word-wrap at `max_width_em`.
    ///
    /// A word wider than the line sits alone on its own line. Empty or
    /// whitespace-only input yields no lines.
    pub fn wrap(&self, text: &str, max_width_em: f32) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;
        let space = self.space_em();

        for word in text.split_whitespace() {
            let word_w = self.measure_em(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space + word_w > max_width_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_w;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA: FontMetricTable = FontMetricTable {
    class: FontClass::Sans,
    bold: false,
    #[rustfmt::skip]
    widths: [
        // sp !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :  ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A-M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N-Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [  \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a-m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n-z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {  |    }    ~
        334, 260, 334, 584,
    ],
    average_width: 520,
};

static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    class: FontClass::Sans,
    bold: true,
    #[rustfmt::skip]
    widths: [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        333, 333, 584, 584, 584, 611, 975,
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        333, 278, 333, 584, 556, 333,
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        389, 280, 389, 584,
    ],
    average_width: 570,
};

static TIMES: FontMetricTable = FontMetricTable {
    class: FontClass::Serif,
    bold: false,
    #[rustfmt::skip]
    widths: [
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        278, 278, 564, 564, 564, 444, 921,
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        333, 278, 333, 469, 500, 333,
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        480, 200, 480, 541,
    ],
    average_width: 470,
};

static TIMES_BOLD: FontMetricTable = FontMetricTable {
    class: FontClass::Serif,
    bold: true,
    #[rustfmt::skip]
    widths: [
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        333, 333, 570, 570, 570, 500, 930,
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
        722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
        333, 278, 333, 581, 500, 333,
        500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
        556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
        394, 220, 394, 520,
    ],
    average_width: 510,
};

static COURIER: FontMetricTable = FontMetricTable {
    class: FontClass::Mono,
    bold: false,
    widths: [600; 95],
    average_width: 600,
};

static COURIER_BOLD: FontMetricTable = FontMetricTable {
    class: FontClass::Mono,
    bold: true,
    widths: [600; 95],
    average_width: 600,
};

/// Returns the static metric table for a class and weight.
pub fn get_metrics(class: FontClass, bold: bool) -> &'static FontMetricTable {
    match (class, bold) {
        (FontClass::Sans, false) => &HELVETICA,
        (FontClass::Sans, true) => &HELVETICA_BOLD,
        (FontClass::Serif, false) => &TIMES,
        (FontClass::Serif, true) => &TIMES_BOLD,
        (FontClass::Mono, false) => &COURIER,
        (FontClass::Mono, true) => &COURIER_BOLD,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_empty_returns_zero() {
        assert_eq!(get_metrics(FontClass::Sans, false).measure_em(""), 0.0);
    }

    #[test]
    fn test_measure_ascii_characters() {
        let metrics = get_metrics(FontClass::Sans, false);
        // "Rust" = R(722) + u(556) + s(500) + t(278) = 2056
        let width = metrics.measure_em("Rust");
        assert!((width - 2.056).abs() < 1e-4, "got {width}");
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let metrics = get_metrics(FontClass::Serif, false);
        assert!((metrics.measure_em("é") - 0.470).abs() < 1e-4);
    }

    #[test]
    fn test_courier_is_monospaced() {
        let metrics = get_metrics(FontClass::Mono, false);
        assert_eq!(metrics.measure_em("iiii"), metrics.measure_em("WWWW"));
    }

    #[test]
    fn test_bold_is_wider() {
        let text = "Senior Software Engineer";
        assert!(
            get_metrics(FontClass::Sans, true).measure_em(text)
                > get_metrics(FontClass::Sans, false).measure_em(text)
        );
    }

    #[test]
    fn test_classify_font_names() {
        assert_eq!(FontClass::classify("JetBrains Mono"), FontClass::Mono);
        assert_eq!(FontClass::classify("Playfair Display"), FontClass::Serif);
        assert_eq!(FontClass::classify("Georgia"), FontClass::Serif);
        assert_eq!(FontClass::classify("Source Sans Pro"), FontClass::Sans);
        assert_eq!(FontClass::classify("PT Sans Serif"), FontClass::Sans);
        assert_eq!(FontClass::classify("Inter"), FontClass::Sans);
    }

    #[test]
    fn test_base_font_names() {
        assert_eq!(FontClass::Serif.base_font(true), "Times-Bold");
        assert_eq!(FontClass::Mono.base_font(false), "Courier");
    }

    #[test]
    fn test_each_table_names_its_own_font() {
        for class in [FontClass::Sans, FontClass::Serif, FontClass::Mono] {
            for bold in [false, true] {
                assert_eq!(get_metrics(class, bold).base_font(), class.base_font(bold));
            }
        }
        assert_eq!(get_metrics(FontClass::Sans, true).base_font(), "Helvetica-Bold");
        assert_eq!(get_metrics(FontClass::Serif, false).base_font(), "Times-Roman");
    }

    #[test]
    fn test_wrap_empty_yields_no_lines() {
        assert!(get_metrics(FontClass::Sans, false).wrap("   ", 10.0).is_empty());
    }

    #[test]
    fn test_wrap_breaks_between_words() {
        let metrics = get_metrics(FontClass::Mono, false);
        // Each word is 5 chars = 3.0em, space 0.6em; two words = 6.6em.
        let lines = metrics.wrap("alpha bravo charl delta", 7.0);
        assert_eq!(lines, vec!["alpha bravo", "charl delta"]);
    }

    #[test]
    fn test_wrap_keeps_long_word_whole() {
        let metrics = get_metrics(FontClass::Mono, false);
        let lines = metrics.wrap("a supercalifragilistic b", 3.0);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }
}
