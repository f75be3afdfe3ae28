//! Closed keyword sets and capability families.
//!
//! Most concepts (border style, paper, fill, ...) are plain closed enums with
//! an ordered `ALL` table. Alignment and border-side keywords are different:
//! one keyword can be valid in several unrelated slots. `top` is a border side
//! and a vertical alignment, `center` is a vertical and a horizontal alignment.
//!
//! Membership is structural. Every [`EnumKeyword`] carries a fixed
//! [`FlagsCapability`] tag set, and each family ([`BorderSide`],
//! [`VerticalAlignment`], [`HorizontalAlignment`]) is the set of keywords
//! tagged with its flag. The grouping enums (`EnumSideHorizontal`, ...) give
//! the same keywords a static type so that a slot accepting a family accepts
//! its members at compile time and rejects everything else.

use bitflags::bitflags;

use crate::error::{EnumXlsxDslError, XlsxDslResult};

////////////////////////////////////////////////////////////////////////////////
// #region CapabilityRegistry

bitflags! {
    /// Capability families a keyword belongs to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FlagsCapability: u8 {
        /// Usable as a border side.
        const BORDER_SIDE = 0b001;
        /// Usable as a vertical alignment.
        const VERTICAL_ALIGNMENT = 0b010;
        /// Usable as a horizontal alignment.
        const HORIZONTAL_ALIGNMENT = 0b100;
    }
}

/// Alignment and border-side keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnumKeyword {
    Top,
    Bottom,
    Left,
    Right,
    Center,
    Justify,
    Distributed,
    General,
    Fill,
    CenterSelection,
}

impl EnumKeyword {
    /// Every keyword, in registry order.
    pub const ALL: [EnumKeyword; 10] = [
        EnumKeyword::Top,
        EnumKeyword::Bottom,
        EnumKeyword::Left,
        EnumKeyword::Right,
        EnumKeyword::Center,
        EnumKeyword::Justify,
        EnumKeyword::Distributed,
        EnumKeyword::General,
        EnumKeyword::Fill,
        EnumKeyword::CenterSelection,
    ];

    /// Fixed capability tags of this keyword.
    pub const fn capabilities(self) -> FlagsCapability {
        match self {
            EnumKeyword::Top | EnumKeyword::Bottom => FlagsCapability::BORDER_SIDE
                .union(FlagsCapability::VERTICAL_ALIGNMENT),
            EnumKeyword::Left | EnumKeyword::Right => FlagsCapability::BORDER_SIDE
                .union(FlagsCapability::HORIZONTAL_ALIGNMENT),
            EnumKeyword::Center | EnumKeyword::Justify => FlagsCapability::VERTICAL_ALIGNMENT
                .union(FlagsCapability::HORIZONTAL_ALIGNMENT),
            EnumKeyword::Distributed => FlagsCapability::VERTICAL_ALIGNMENT,
            EnumKeyword::General | EnumKeyword::Fill | EnumKeyword::CenterSelection => {
                FlagsCapability::HORIZONTAL_ALIGNMENT
            }
        }
    }

    /// Whether the keyword belongs to every family in `capability`.
    pub const fn is(self, capability: FlagsCapability) -> bool {
        self.capabilities().contains(capability)
    }

    /// Lower-case DSL name.
    pub const fn name(self) -> &'static str {
        match self {
            EnumKeyword::Top => "top",
            EnumKeyword::Bottom => "bottom",
            EnumKeyword::Left => "left",
            EnumKeyword::Right => "right",
            EnumKeyword::Center => "center",
            EnumKeyword::Justify => "justify",
            EnumKeyword::Distributed => "distributed",
            EnumKeyword::General => "general",
            EnumKeyword::Fill => "fill",
            EnumKeyword::CenterSelection => "centerSelection",
        }
    }

    /// Keywords tagged with every family in `capability`, in registry order.
    pub fn tagged(capability: FlagsCapability) -> Vec<EnumKeyword> {
        EnumKeyword::ALL
            .into_iter()
            .filter(|kw| kw.is(capability))
            .collect()
    }

    /// Border sides in declaration order.
    pub const BORDER_SIDES: [EnumKeyword; 4] = [
        EnumKeyword::Top,
        EnumKeyword::Bottom,
        EnumKeyword::Left,
        EnumKeyword::Right,
    ];

    /// Vertical alignments in declaration order.
    pub const VERTICAL_ALIGNMENTS: [EnumKeyword; 5] = [
        EnumKeyword::Top,
        EnumKeyword::Center,
        EnumKeyword::Bottom,
        EnumKeyword::Justify,
        EnumKeyword::Distributed,
    ];

    /// Horizontal alignments in declaration order.
    pub const HORIZONTAL_ALIGNMENTS: [EnumKeyword; 7] = [
        EnumKeyword::Right,
        EnumKeyword::Left,
        EnumKeyword::General,
        EnumKeyword::Center,
        EnumKeyword::Fill,
        EnumKeyword::Justify,
        EnumKeyword::CenterSelection,
    ];
}

macro_rules! define_capability_family {
    ($(#[$meta:meta])* $name:ident, $flag:expr, $table:expr, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(EnumKeyword);

        impl $name {
            /// Ordered members of this family.
            pub fn members() -> Vec<$name> {
                $table.into_iter().map($name).collect()
            }

            /// Underlying keyword.
            pub const fn keyword(self) -> EnumKeyword {
                self.0
            }
        }

        impl TryFrom<EnumKeyword> for $name {
            type Error = EnumXlsxDslError;

            fn try_from(value: EnumKeyword) -> XlsxDslResult<Self> {
                if value.is($flag) {
                    Ok($name(value))
                } else {
                    Err(EnumXlsxDslError::invalid(format!(
                        "{:?} is not a {}",
                        value.name(),
                        $label
                    )))
                }
            }
        }

        impl From<$name> for EnumKeyword {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_capability_family!(
    /// Any keyword usable as a border side.
    BorderSide,
    FlagsCapability::BORDER_SIDE,
    EnumKeyword::BORDER_SIDES,
    "border side"
);
define_capability_family!(
    /// Any keyword usable as a vertical alignment.
    VerticalAlignment,
    FlagsCapability::VERTICAL_ALIGNMENT,
    EnumKeyword::VERTICAL_ALIGNMENTS,
    "vertical alignment"
);
define_capability_family!(
    /// Any keyword usable as a horizontal alignment.
    HorizontalAlignment,
    FlagsCapability::HORIZONTAL_ALIGNMENT,
    EnumKeyword::HORIZONTAL_ALIGNMENTS,
    "horizontal alignment"
);

impl BorderSide {
    pub const TOP: BorderSide = BorderSide(EnumKeyword::Top);
    pub const BOTTOM: BorderSide = BorderSide(EnumKeyword::Bottom);
    pub const LEFT: BorderSide = BorderSide(EnumKeyword::Left);
    pub const RIGHT: BorderSide = BorderSide(EnumKeyword::Right);
}

/// Keywords that are both border sides and horizontal alignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumSideHorizontal {
    Left,
    Right,
}

/// Keywords that are both border sides and vertical alignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumSideVertical {
    Top,
    Bottom,
}

/// Keywords that are both vertical and horizontal alignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumVerticalHorizontal {
    Center,
    Justify,
}

/// Vertical-only alignment keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumPureVertical {
    Distributed,
}

/// Horizontal-only alignment keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumPureHorizontal {
    General,
    Fill,
    CenterSelection,
}

impl From<EnumSideHorizontal> for EnumKeyword {
    fn from(value: EnumSideHorizontal) -> Self {
        match value {
            EnumSideHorizontal::Left => EnumKeyword::Left,
            EnumSideHorizontal::Right => EnumKeyword::Right,
        }
    }
}

impl From<EnumSideVertical> for EnumKeyword {
    fn from(value: EnumSideVertical) -> Self {
        match value {
            EnumSideVertical::Top => EnumKeyword::Top,
            EnumSideVertical::Bottom => EnumKeyword::Bottom,
        }
    }
}

impl From<EnumVerticalHorizontal> for EnumKeyword {
    fn from(value: EnumVerticalHorizontal) -> Self {
        match value {
            EnumVerticalHorizontal::Center => EnumKeyword::Center,
            EnumVerticalHorizontal::Justify => EnumKeyword::Justify,
        }
    }
}

impl From<EnumPureVertical> for EnumKeyword {
    fn from(value: EnumPureVertical) -> Self {
        match value {
            EnumPureVertical::Distributed => EnumKeyword::Distributed,
        }
    }
}

impl From<EnumPureHorizontal> for EnumKeyword {
    fn from(value: EnumPureHorizontal) -> Self {
        match value {
            EnumPureHorizontal::General => EnumKeyword::General,
            EnumPureHorizontal::Fill => EnumKeyword::Fill,
            EnumPureHorizontal::CenterSelection => EnumKeyword::CenterSelection,
        }
    }
}

// Each grouping enum converts into exactly the families named by its tags.
macro_rules! impl_family_membership {
    ($group:ty => $($family:ident),+) => {
        $(
            impl From<$group> for $family {
                fn from(value: $group) -> Self {
                    $family(EnumKeyword::from(value))
                }
            }
        )+
    };
}

impl_family_membership!(EnumSideHorizontal => BorderSide, HorizontalAlignment);
impl_family_membership!(EnumSideVertical => BorderSide, VerticalAlignment);
impl_family_membership!(EnumVerticalHorizontal => VerticalAlignment, HorizontalAlignment);
impl_family_membership!(EnumPureVertical => VerticalAlignment);
impl_family_membership!(EnumPureHorizontal => HorizontalAlignment);

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ClosedEnumerations

/// Cell border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnumBorderStyle {
    #[default]
    None,
    Thin,
    Medium,
    Dashed,
    Dotted,
    Thick,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantedDashDot,
}

impl EnumBorderStyle {
    pub const ALL: [EnumBorderStyle; 14] = [
        EnumBorderStyle::None,
        EnumBorderStyle::Thin,
        EnumBorderStyle::Medium,
        EnumBorderStyle::Dashed,
        EnumBorderStyle::Dotted,
        EnumBorderStyle::Thick,
        EnumBorderStyle::Double,
        EnumBorderStyle::Hair,
        EnumBorderStyle::MediumDashed,
        EnumBorderStyle::DashDot,
        EnumBorderStyle::MediumDashDot,
        EnumBorderStyle::DashDotDot,
        EnumBorderStyle::MediumDashDotDot,
        EnumBorderStyle::SlantedDashDot,
    ];
}

/// Print paper size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumPaper {
    Letter,
    LetterSmall,
    Tabloid,
    Ledger,
    Legal,
    Statement,
    Executive,
    A3,
    A4,
    A4Small,
    A5,
    B4,
    B5,
    Folio,
    Quarto,
    Standard10x14,
    Standard11x17,
}

impl EnumPaper {
    pub const ALL: [EnumPaper; 17] = [
        EnumPaper::Letter,
        EnumPaper::LetterSmall,
        EnumPaper::Tabloid,
        EnumPaper::Ledger,
        EnumPaper::Legal,
        EnumPaper::Statement,
        EnumPaper::Executive,
        EnumPaper::A3,
        EnumPaper::A4,
        EnumPaper::A4Small,
        EnumPaper::A5,
        EnumPaper::B4,
        EnumPaper::B5,
        EnumPaper::Folio,
        EnumPaper::Quarto,
        EnumPaper::Standard10x14,
        EnumPaper::Standard11x17,
    ];

    /// Excel paper-size code.
    pub const fn excel_code(self) -> u8 {
        match self {
            EnumPaper::Letter => 1,
            EnumPaper::LetterSmall => 2,
            EnumPaper::Tabloid => 3,
            EnumPaper::Ledger => 4,
            EnumPaper::Legal => 5,
            EnumPaper::Statement => 6,
            EnumPaper::Executive => 7,
            EnumPaper::A3 => 8,
            EnumPaper::A4 => 9,
            EnumPaper::A4Small => 10,
            EnumPaper::A5 => 11,
            EnumPaper::B4 => 12,
            EnumPaper::B5 => 13,
            EnumPaper::Folio => 14,
            EnumPaper::Quarto => 15,
            EnumPaper::Standard10x14 => 16,
            EnumPaper::Standard11x17 => 17,
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumOrientation {
    Landscape,
    Portrait,
}

impl EnumOrientation {
    pub const ALL: [EnumOrientation; 2] = [EnumOrientation::Landscape, EnumOrientation::Portrait];
}

/// Fit-to-pages dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumFit {
    Height,
    Width,
}

impl EnumFit {
    pub const ALL: [EnumFit; 2] = [EnumFit::Height, EnumFit::Width];
}

/// Font style flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnumFontStyle {
    Italic,
    Bold,
    Strikeout,
    Underline,
}

impl EnumFontStyle {
    pub const ALL: [EnumFontStyle; 4] = [
        EnumFontStyle::Italic,
        EnumFontStyle::Bold,
        EnumFontStyle::Strikeout,
        EnumFontStyle::Underline,
    ];
}

/// Foreground fill pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumForegroundFill {
    NoFill,
    SolidForeground,
    FineDots,
    AltBars,
    SparseDots,
    ThickHorizontalBands,
    ThickVerticalBands,
    ThickBackwardDiagonals,
    ThickForwardDiagonals,
    BigSpots,
    Bricks,
    ThinHorizontalBands,
    ThinVerticalBands,
    ThinBackwardDiagonals,
    ThinForwardDiagonals,
    Squares,
    Diamonds,
    LessDots,
    LeastDots,
}

impl EnumForegroundFill {
    pub const ALL: [EnumForegroundFill; 19] = [
        EnumForegroundFill::NoFill,
        EnumForegroundFill::SolidForeground,
        EnumForegroundFill::FineDots,
        EnumForegroundFill::AltBars,
        EnumForegroundFill::SparseDots,
        EnumForegroundFill::ThickHorizontalBands,
        EnumForegroundFill::ThickVerticalBands,
        EnumForegroundFill::ThickBackwardDiagonals,
        EnumForegroundFill::ThickForwardDiagonals,
        EnumForegroundFill::BigSpots,
        EnumForegroundFill::Bricks,
        EnumForegroundFill::ThinHorizontalBands,
        EnumForegroundFill::ThinVerticalBands,
        EnumForegroundFill::ThinBackwardDiagonals,
        EnumForegroundFill::ThinForwardDiagonals,
        EnumForegroundFill::Squares,
        EnumForegroundFill::Diamonds,
        EnumForegroundFill::LessDots,
        EnumForegroundFill::LeastDots,
    ];
}

/// Sheet protection/visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumSheetState {
    Locked,
    Visible,
    Hidden,
    VeryHidden,
}

impl EnumSheetState {
    pub const ALL: [EnumSheetState; 4] = [
        EnumSheetState::Locked,
        EnumSheetState::Visible,
        EnumSheetState::Hidden,
        EnumSheetState::VeryHidden,
    ];
}

/// `auto` marker used by `filter(auto)` and auto column width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumAuto {
    Auto,
}

/// `text` marker used by `wrap(text)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumText {
    Wrap,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region KeywordConstants

/// Lower-case keyword constants for DSL-style call sites.
pub mod kw {
    use super::*;

    pub const LEFT: EnumSideHorizontal = EnumSideHorizontal::Left;
    pub const RIGHT: EnumSideHorizontal = EnumSideHorizontal::Right;
    pub const TOP: EnumSideVertical = EnumSideVertical::Top;
    pub const BOTTOM: EnumSideVertical = EnumSideVertical::Bottom;
    pub const CENTER: EnumVerticalHorizontal = EnumVerticalHorizontal::Center;
    pub const JUSTIFY: EnumVerticalHorizontal = EnumVerticalHorizontal::Justify;
    pub const DISTRIBUTED: EnumPureVertical = EnumPureVertical::Distributed;
    pub const GENERAL: EnumPureHorizontal = EnumPureHorizontal::General;
    pub const FILL: EnumPureHorizontal = EnumPureHorizontal::Fill;
    pub const CENTER_SELECTION: EnumPureHorizontal = EnumPureHorizontal::CenterSelection;

    pub const NONE: EnumBorderStyle = EnumBorderStyle::None;
    pub const THIN: EnumBorderStyle = EnumBorderStyle::Thin;
    pub const MEDIUM: EnumBorderStyle = EnumBorderStyle::Medium;
    pub const DASHED: EnumBorderStyle = EnumBorderStyle::Dashed;
    pub const DOTTED: EnumBorderStyle = EnumBorderStyle::Dotted;
    pub const THICK: EnumBorderStyle = EnumBorderStyle::Thick;
    pub const DOUBLE: EnumBorderStyle = EnumBorderStyle::Double;
    pub const HAIR: EnumBorderStyle = EnumBorderStyle::Hair;
    pub const DASH_DOT_DOT: EnumBorderStyle = EnumBorderStyle::DashDotDot;

    pub const PORTRAIT: EnumOrientation = EnumOrientation::Portrait;
    pub const LANDSCAPE: EnumOrientation = EnumOrientation::Landscape;
    pub const WIDTH: EnumFit = EnumFit::Width;
    pub const HEIGHT: EnumFit = EnumFit::Height;

    pub const LETTER: EnumPaper = EnumPaper::Letter;
    pub const LEGAL: EnumPaper = EnumPaper::Legal;
    pub const A3: EnumPaper = EnumPaper::A3;
    pub const A4: EnumPaper = EnumPaper::A4;
    pub const A5: EnumPaper = EnumPaper::A5;

    pub const ITALIC: EnumFontStyle = EnumFontStyle::Italic;
    pub const BOLD: EnumFontStyle = EnumFontStyle::Bold;
    pub const STRIKEOUT: EnumFontStyle = EnumFontStyle::Strikeout;
    pub const UNDERLINE: EnumFontStyle = EnumFontStyle::Underline;

    pub const NO_FILL: EnumForegroundFill = EnumForegroundFill::NoFill;
    pub const SOLID_FOREGROUND: EnumForegroundFill = EnumForegroundFill::SolidForeground;
    pub const FINE_DOTS: EnumForegroundFill = EnumForegroundFill::FineDots;

    pub const LOCKED: EnumSheetState = EnumSheetState::Locked;
    pub const VISIBLE: EnumSheetState = EnumSheetState::Visible;
    pub const HIDDEN: EnumSheetState = EnumSheetState::Hidden;
    pub const VERY_HIDDEN: EnumSheetState = EnumSheetState::VeryHidden;

    pub const AUTO: EnumAuto = EnumAuto::Auto;
    pub const TEXT: EnumText = EnumText::Wrap;
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn accept_border_side(side: impl Into<BorderSide>) -> EnumKeyword {
        side.into().keyword()
    }

    fn accept_horizontal(align: impl Into<HorizontalAlignment>) -> EnumKeyword {
        align.into().keyword()
    }

    fn accept_vertical(align: impl Into<VerticalAlignment>) -> EnumKeyword {
        align.into().keyword()
    }

    #[test]
    fn test_left_right_satisfy_border_side_and_horizontal() {
        for value in [kw::LEFT, kw::RIGHT] {
            assert_eq!(accept_border_side(value), accept_horizontal(value));
        }
        assert_eq!(accept_border_side(kw::LEFT), EnumKeyword::Left);
    }

    #[test]
    fn test_top_bottom_satisfy_border_side_and_vertical() {
        for value in [kw::TOP, kw::BOTTOM] {
            assert_eq!(accept_border_side(value), accept_vertical(value));
        }
    }

    #[test]
    fn test_center_justify_satisfy_both_alignments() {
        assert_eq!(accept_vertical(kw::CENTER), EnumKeyword::Center);
        assert_eq!(accept_horizontal(kw::CENTER), EnumKeyword::Center);
        assert_eq!(accept_vertical(kw::JUSTIFY), accept_horizontal(kw::JUSTIFY));
    }

    #[test]
    fn test_family_members_are_ordered_and_exhaustive() {
        let l_sides: Vec<EnumKeyword> = BorderSide::members()
            .into_iter()
            .map(BorderSide::keyword)
            .collect();
        assert_eq!(
            l_sides,
            vec![
                EnumKeyword::Top,
                EnumKeyword::Bottom,
                EnumKeyword::Left,
                EnumKeyword::Right
            ]
        );

        let l_vertical: Vec<EnumKeyword> = VerticalAlignment::members()
            .into_iter()
            .map(VerticalAlignment::keyword)
            .collect();
        assert_eq!(
            l_vertical,
            vec![
                EnumKeyword::Top,
                EnumKeyword::Center,
                EnumKeyword::Bottom,
                EnumKeyword::Justify,
                EnumKeyword::Distributed
            ]
        );

        let l_horizontal: Vec<EnumKeyword> = HorizontalAlignment::members()
            .into_iter()
            .map(HorizontalAlignment::keyword)
            .collect();
        assert_eq!(
            l_horizontal,
            vec![
                EnumKeyword::Right,
                EnumKeyword::Left,
                EnumKeyword::General,
                EnumKeyword::Center,
                EnumKeyword::Fill,
                EnumKeyword::Justify,
                EnumKeyword::CenterSelection
            ]
        );
    }

    #[test]
    fn test_family_tables_match_capability_tags() {
        let to_set = |l: &[EnumKeyword]| l.iter().copied().collect::<BTreeSet<_>>();
        for (table, flag) in [
            (&EnumKeyword::BORDER_SIDES[..], FlagsCapability::BORDER_SIDE),
            (&EnumKeyword::VERTICAL_ALIGNMENTS[..], FlagsCapability::VERTICAL_ALIGNMENT),
            (&EnumKeyword::HORIZONTAL_ALIGNMENTS[..], FlagsCapability::HORIZONTAL_ALIGNMENT),
        ] {
            assert_eq!(to_set(table), to_set(&EnumKeyword::tagged(flag)));
            assert_eq!(to_set(table).len(), table.len());
        }
    }

    #[test]
    fn test_try_from_admits_exactly_tagged_keywords() {
        for keyword in EnumKeyword::ALL {
            assert_eq!(
                BorderSide::try_from(keyword).is_ok(),
                keyword.is(FlagsCapability::BORDER_SIDE)
            );
            assert_eq!(
                VerticalAlignment::try_from(keyword).is_ok(),
                keyword.is(FlagsCapability::VERTICAL_ALIGNMENT)
            );
            assert_eq!(
                HorizontalAlignment::try_from(keyword).is_ok(),
                keyword.is(FlagsCapability::HORIZONTAL_ALIGNMENT)
            );
        }
        assert!(matches!(
            BorderSide::try_from(EnumKeyword::Center),
            Err(EnumXlsxDslError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_static_conversions_agree_with_tags() {
        let l_side_horizontal = [EnumSideHorizontal::Left, EnumSideHorizontal::Right];
        for value in l_side_horizontal {
            let keyword = EnumKeyword::from(value);
            assert!(keyword.is(FlagsCapability::BORDER_SIDE | FlagsCapability::HORIZONTAL_ALIGNMENT));
            assert!(!keyword.is(FlagsCapability::VERTICAL_ALIGNMENT));
        }
        assert_eq!(
            EnumKeyword::from(EnumPureVertical::Distributed).capabilities(),
            FlagsCapability::VERTICAL_ALIGNMENT
        );
        for value in [
            EnumPureHorizontal::General,
            EnumPureHorizontal::Fill,
            EnumPureHorizontal::CenterSelection,
        ] {
            assert_eq!(
                EnumKeyword::from(value).capabilities(),
                FlagsCapability::HORIZONTAL_ALIGNMENT
            );
        }
    }

    #[test]
    fn test_paper_codes_are_distinct() {
        let mut l_codes: Vec<u8> = EnumPaper::ALL.iter().map(|p| p.excel_code()).collect();
        l_codes.dedup();
        assert_eq!(l_codes.len(), EnumPaper::ALL.len());
        assert_eq!(EnumPaper::A4.excel_code(), 9);
    }
}
