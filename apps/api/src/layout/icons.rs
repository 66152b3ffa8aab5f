//! Icons: semantic identifiers, keyword matching for skill chips, and the
//! self-contained vector glyphs used where no icon font is available.
//!
//! Glyph coordinates live in a 24×24 box, origin top-left, y down.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Mail,
    Phone,
    Location,
    Globe,
    Linkedin,
    Code,
    Database,
    Design,
    Cloud,
    Language,
    Chart,
    People,
    Star,
}

impl Icon {
    /// Icon-font class used by the preview surface.
    pub fn font_class(self) -> &'static str {
        match self {
            Icon::Mail => "fa-envelope",
            Icon::Phone => "fa-phone",
            Icon::Location => "fa-location-dot",
            Icon::Globe => "fa-globe",
            Icon::Linkedin => "fa-linkedin",
            Icon::Code => "fa-code",
            Icon::Database => "fa-database",
            Icon::Design => "fa-pen-nib",
            Icon::Cloud => "fa-cloud",
            Icon::Language => "fa-language",
            Icon::Chart => "fa-chart-column",
            Icon::People => "fa-users",
            Icon::Star => "fa-star",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill keyword matching
// ────────────────────────────────────────────────────────────────────────────

/// Checked in order; the first category with a matching keyword wins.
const SKILL_KEYWORDS: &[(Icon, &[&str])] = &[
    (
        Icon::Database,
        &[
            "sql", "mysql", "postgres", "postgresql", "mongodb", "mongo", "redis", "database",
            "databases", "oracle", "sqlite", "elasticsearch", "databaser",
        ],
    ),
    (
        Icon::Cloud,
        &[
            "aws", "azure", "gcp", "cloud", "docker", "kubernetes", "k8s", "terraform", "devops",
            "linux", "ci/cd",
        ],
    ),
    (
        Icon::Code,
        &[
            "javascript", "typescript", "js", "ts", "rust", "go", "golang", "python", "java",
            "kotlin", "swift", "c", "c++", "c#", "php", "ruby", "react", "vue", "angular", "node",
            "html", "css", "programming", "programmering", "git", "scala", "elixir",
        ],
    ),
    (
        Icon::Design,
        &[
            "figma", "sketch", "photoshop", "illustrator", "design", "ui", "ux", "indesign",
            "canva", "adobe",
        ],
    ),
    (
        Icon::Chart,
        &[
            "excel", "analytics", "analys", "analysis", "data", "statistics", "statistik", "tableau",
            "power bi", "machine learning", "ml",
        ],
    ),
    (
        Icon::Language,
        &[
            "english", "engelska", "swedish", "svenska", "spanish", "spanska", "german", "tyska",
            "french", "franska", "finnish", "finska", "norwegian", "norska", "danish", "danska",
            "arabic", "arabiska", "chinese", "kinesiska",
        ],
    ),
    (
        Icon::People,
        &[
            "leadership", "ledarskap", "communication", "kommunikation", "teamwork", "management",
            "agile", "scrum", "coaching", "mentoring",
        ],
    ),
];

/// Picks an icon for a skill chip by keyword match on the skill name.
///
/// Single-word keywords must equal a whole token of the name; multi-word
/// keywords match as a substring. Unmatched names get `Icon::Star`.
pub fn skill_icon(name: &str) -> Icon {
    let lower = name.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')' | '-' | '.' | '&'))
        .filter(|t| !t.is_empty())
        .collect();

    SKILL_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            keywords.iter().any(|kw| {
                if kw.contains(' ') {
                    lower.contains(kw)
                } else {
                    tokens.contains(kw)
                }
            })
        })
        .map(|(icon, _)| *icon)
        .unwrap_or(Icon::Star)
}

// ────────────────────────────────────────────────────────────────────────────
// Vector glyphs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Glyph {
    /// Filled polygon.
    Fill(&'static [(f32, f32)]),
    /// Stroked polyline.
    Stroke {
        points: &'static [(f32, f32)],
        width: f32,
        closed: bool,
    },
    /// Filled circle.
    Disc { cx: f32, cy: f32, r: f32 },
    /// Stroked circle.
    Ring { cx: f32, cy: f32, r: f32, width: f32 },
}

pub const GLYPH_BOX: f32 = 24.0;

const STAR_POINTS: &[(f32, f32)] = &[
    (12.0, 2.0),
    (14.9, 8.6),
    (22.0, 9.3),
    (16.6, 14.0),
    (18.2, 21.0),
    (12.0, 17.3),
    (5.8, 21.0),
    (7.4, 14.0),
    (2.0, 9.3),
    (9.1, 8.6),
];

pub fn star_points() -> &'static [(f32, f32)] {
    STAR_POINTS
}

/// Vector glyph parts for an icon.
pub fn glyphs(icon: Icon) -> &'static [Glyph] {
    match icon {
        Icon::Mail => &[Glyph::Stroke {
            points: &[
                (2.0, 5.0),
                (22.0, 5.0),
                (22.0, 19.0),
                (2.0, 19.0),
                (2.0, 5.0),
                (12.0, 13.0),
                (22.0, 5.0),
            ],
            width: 2.0,
            closed: false,
        }],
        Icon::Phone => &[Glyph::Fill(&[
            (5.0, 2.0),
            (9.0, 2.0),
            (11.0, 7.0),
            (8.5, 9.5),
            (14.5, 15.5),
            (17.0, 13.0),
            (22.0, 15.0),
            (22.0, 19.0),
            (19.0, 22.0),
            (2.0, 5.0),
        ])],
        Icon::Location => &[Glyph::Fill(&[
            (12.0, 23.0),
            (5.0, 12.0),
            (4.5, 8.0),
            (7.5, 3.5),
            (12.0, 2.0),
            (16.5, 3.5),
            (19.5, 8.0),
            (19.0, 12.0),
        ])],
        Icon::Globe => &[
            Glyph::Ring {
                cx: 12.0,
                cy: 12.0,
                r: 9.5,
                width: 2.0,
            },
            Glyph::Stroke {
                points: &[(2.5, 12.0), (21.5, 12.0)],
                width: 1.5,
                closed: false,
            },
            Glyph::Stroke {
                points: &[(12.0, 2.5), (8.0, 12.0), (12.0, 21.5), (16.0, 12.0)],
                width: 1.5,
                closed: true,
            },
        ],
        Icon::Linkedin => &[
            Glyph::Stroke {
                points: &[(3.0, 3.0), (21.0, 3.0), (21.0, 21.0), (3.0, 21.0)],
                width: 2.0,
                closed: true,
            },
            Glyph::Disc {
                cx: 8.0,
                cy: 7.5,
                r: 1.4,
            },
            Glyph::Stroke {
                points: &[(8.0, 10.5), (8.0, 17.5)],
                width: 2.0,
                closed: false,
            },
            Glyph::Stroke {
                points: &[(12.0, 17.5), (12.0, 10.5), (16.0, 10.5), (16.5, 17.5)],
                width: 2.0,
                closed: false,
            },
        ],
        Icon::Code => &[
            Glyph::Stroke {
                points: &[(8.0, 6.0), (2.0, 12.0), (8.0, 18.0)],
                width: 2.0,
                closed: false,
            },
            Glyph::Stroke {
                points: &[(16.0, 6.0), (22.0, 12.0), (16.0, 18.0)],
                width: 2.0,
                closed: false,
            },
        ],
        Icon::Database => &[
            Glyph::Stroke {
                points: &[(4.0, 4.0), (20.0, 4.0), (20.0, 20.0), (4.0, 20.0)],
                width: 2.0,
                closed: true,
            },
            Glyph::Stroke {
                points: &[(4.0, 9.5), (20.0, 9.5)],
                width: 1.5,
                closed: false,
            },
            Glyph::Stroke {
                points: &[(4.0, 15.0), (20.0, 15.0)],
                width: 1.5,
                closed: false,
            },
        ],
        Icon::Design => &[Glyph::Fill(&[
            (12.0, 2.0),
            (20.0, 10.0),
            (12.0, 22.0),
            (4.0, 10.0),
        ])],
        Icon::Cloud => &[Glyph::Fill(&[
            (6.0, 19.0),
            (3.0, 16.5),
            (3.0, 13.0),
            (6.0, 10.5),
            (8.0, 7.0),
            (12.0, 5.0),
            (16.0, 6.5),
            (18.0, 10.0),
            (21.0, 11.5),
            (22.0, 15.0),
            (20.0, 19.0),
        ])],
        Icon::Language => &[Glyph::Stroke {
            points: &[
                (3.0, 4.0),
                (21.0, 4.0),
                (21.0, 16.0),
                (10.0, 16.0),
                (5.0, 21.0),
                (6.0, 16.0),
                (3.0, 16.0),
            ],
            width: 2.0,
            closed: true,
        }],
        Icon::Chart => &[
            Glyph::Fill(&[(3.0, 21.0), (3.0, 13.0), (7.0, 13.0), (7.0, 21.0)]),
            Glyph::Fill(&[(10.0, 21.0), (10.0, 8.0), (14.0, 8.0), (14.0, 21.0)]),
            Glyph::Fill(&[(17.0, 21.0), (17.0, 3.0), (21.0, 3.0), (21.0, 21.0)]),
        ],
        Icon::People => &[
            Glyph::Disc {
                cx: 9.0,
                cy: 7.5,
                r: 3.5,
            },
            Glyph::Fill(&[(2.5, 21.0), (3.5, 15.0), (9.0, 12.5), (14.5, 15.0), (15.5, 21.0)]),
            Glyph::Disc {
                cx: 17.0,
                cy: 8.5,
                r: 2.5,
            },
        ],
        Icon::Star => &[Glyph::Fill(STAR_POINTS)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_matches_code_as_whole_token() {
        assert_eq!(skill_icon("Go"), Icon::Code);
        // "go" inside "MongoDB" must not count as Go
        assert_eq!(skill_icon("MongoDB"), Icon::Database);
    }

    #[test]
    fn test_punctuated_names_tokenize() {
        assert_eq!(skill_icon("Node.js"), Icon::Code);
        assert_eq!(skill_icon("C++"), Icon::Code);
        assert_eq!(skill_icon("UI/UX Design"), Icon::Design);
    }

    #[test]
    fn test_multi_word_keyword_matches_substring() {
        assert_eq!(skill_icon("Machine Learning"), Icon::Chart);
        assert_eq!(skill_icon("Power BI dashboards"), Icon::Chart);
    }

    #[test]
    fn test_languages_in_swedish_and_english() {
        assert_eq!(skill_icon("Svenska"), Icon::Language);
        assert_eq!(skill_icon("English (fluent)"), Icon::Language);
    }

    #[test]
    fn test_unknown_and_empty_names_default_to_star() {
        assert_eq!(skill_icon("Underwater basket weaving"), Icon::Star);
        assert_eq!(skill_icon(""), Icon::Star);
    }

    #[test]
    fn test_every_icon_has_glyphs_inside_box() {
        let all = [
            Icon::Mail,
            Icon::Phone,
            Icon::Location,
            Icon::Globe,
            Icon::Linkedin,
            Icon::Code,
            Icon::Database,
            Icon::Design,
            Icon::Cloud,
            Icon::Language,
            Icon::Chart,
            Icon::People,
            Icon::Star,
        ];
        for icon in all {
            let parts = glyphs(icon);
            assert!(!parts.is_empty(), "{icon:?} has no glyphs");
            for part in parts {
                let points: &[(f32, f32)] = match part {
                    Glyph::Fill(p) => *p,
                    Glyph::Stroke { points, .. } => *points,
                    Glyph::Disc { .. } | Glyph::Ring { .. } => &[],
                };
                for (x, y) in points {
                    assert!((0.0..=GLYPH_BOX).contains(x) && (0.0..=GLYPH_BOX).contains(y));
                }
            }
        }
    }
}
