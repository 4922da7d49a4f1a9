//! Cardsmith turns a folder of tag-annotated character portraits into a stat sheet and
//! then into finished trading-card images.
//!
//! # Pipeline overview
//!
//! 1. **Generate**: `*.txt` descriptors -> [`TagSet`] -> [`TagRuleEngine`] -> [`CharacterRecord`]
//!    rows written to a comma-separated [`Sheet`].
//! 2. **Render**: sheet rows -> validated records -> [`CardCompositor`] -> PNG files named by
//!    [`OutputDir`], which never overwrites an earlier card.
//!
//! The rule engine performs no IO and draws every random number from a caller-supplied
//! [`RandomSource`], so a seeded run is reproducible. Compositing is single-threaded and
//! each card canvas is owned by the call that renders it.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod assets;
mod foundation;
mod generate;
mod layout;
mod model;
mod render;
mod rules;

pub use assets::decode::{decode_image, encode_png, load_image};
pub use assets::resolver::{AssetResolver, UiElement};
pub use foundation::core::{CARD_SIZE, Canvas, Point, Rgba8, Size};
pub use foundation::error::{CardError, CardResult};
pub use foundation::random::{RandomSource, RngSource, SequenceRandom};
pub use generate::names::NamePool;
pub use generate::pipeline::{CharacterGenerationPipeline, GenerationReport};
pub use layout::config::{BadgeStyle, LayoutConfig, LayoutSlot, PortraitLayout, SlotName, TextColors};
pub use model::record::{
    Background, COLUMNS, CharacterRecord, DamageType, Gender, LANGUAGE_SLOTS, REQUIRED_COLUMNS,
    StatSlot,
};
pub use model::sheet::{Sheet, SheetRow};
pub use render::compositor::CardCompositor;
pub use render::feather::{apply_feather, feather_alpha, feather_mask};
pub use render::glow::{GlowStyle, GlowTextRenderer, glow_offsets};
pub use render::pipeline::{CardRenderingPipeline, OutputDir, RenderReport, RowIssue, file_stem_for};
pub use render::text::{BlockGlyphs, GlyphStamp, ParleyText, TextExtent, TextLayoutEngine, TextRasterizer};
pub use rules::engine::{Derivation, EVADE_TABLE, TagRuleEngine, evade_for_armor_sum, resolve_gender};
pub use rules::tables::RuleTables;
pub use rules::tags::TagSet;
