//! Configuration for dock-interact.
//!
//! The config is a KDL document decoded with [`knuffel`]. Every node is optional and falls back
//! to the values in `resources/default-config.kdl`.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use knuffel::errors::DecodeError;
use miette::{Context, IntoDiagnostic};
use tracing::debug;

/// The default config, shipped alongside the binary.
pub const DEFAULT_CONFIG: &str = include_str!("../../resources/default-config.kdl");

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub drag: Drag,
    #[knuffel(child, default)]
    pub preview: Preview,
}

/// Drag-and-reorder settings.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// Manhattan distance the pointer travels after a press before it becomes a drag.
    #[knuffel(child, unwrap(argument), default = Self::default().start_threshold)]
    pub start_threshold: FloatOrInt<0, 65535>,
    /// Removal distance, as a multiple of the dock thickness.
    #[knuffel(child, unwrap(argument), default = Self::default().distance_multiple)]
    pub distance_multiple: FloatOrInt<0, 100>,
    #[knuffel(child, unwrap(argument), default = Self::default().go_back_duration_ms)]
    pub go_back_duration_ms: u32,
    #[knuffel(child, unwrap(argument), default = Self::default().remove_animation_duration_ms)]
    pub remove_animation_duration_ms: u32,
}

impl Default for Drag {
    fn default() -> Self {
        Self {
            start_threshold: FloatOrInt(20.),
            distance_multiple: FloatOrInt(1.5),
            go_back_duration_ms: 300,
            remove_animation_duration_ms: 300,
        }
    }
}

/// Window-preview popup settings.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Preview {
    #[knuffel(child, unwrap(argument), default = Self::default().show_delay_ms)]
    pub show_delay_ms: u32,
    #[knuffel(child, unwrap(argument), default = Self::default().leave_delay_ms)]
    pub leave_delay_ms: u32,
    /// Whether a compositor is running; without one there is no floating preview.
    #[knuffel(child, unwrap(argument), default = Self::default().composited)]
    pub composited: bool,
}

impl Default for Preview {
    fn default() -> Self {
        Self {
            show_delay_ms: 200,
            leave_delay_ms: 300,
            composited: true,
        }
    }
}

/// A number that accepts both integer and decimal KDL literals, bounded to `MIN..=MAX`.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct FloatOrInt<const MIN: i32, const MAX: i32>(pub f64);

impl Config {
    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        let _span = tracy_client::span!("Config::parse");
        knuffel::parse(filename, text)
    }

    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let filename = path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("config.kdl");
        let config = Self::parse(filename, &contents).context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }
}

impl<S: knuffel::traits::ErrorSpan, const MIN: i32, const MAX: i32> knuffel::DecodeScalar<S>
    for FloatOrInt<MIN, MAX>
{
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        if let Some(type_name) = &type_name {
            ctx.emit_error(DecodeError::unexpected(
                type_name,
                "type name",
                "no type name expected for this node",
            ));
        }
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        match &**val {
            knuffel::ast::Literal::Int(ref value) => match value.try_into() {
                Ok(v) => {
                    if (MIN..=MAX).contains(&v) {
                        Ok(FloatOrInt(f64::from(v)))
                    } else {
                        ctx.emit_error(DecodeError::conversion(
                            val,
                            format!("value must be between {MIN} and {MAX}"),
                        ));
                        Ok(FloatOrInt::default())
                    }
                }
                Err(e) => {
                    ctx.emit_error(DecodeError::conversion(val, e));
                    Ok(FloatOrInt::default())
                }
            },
            knuffel::ast::Literal::Decimal(ref value) => match value.try_into() {
                Ok(v) => {
                    if (f64::from(MIN)..=f64::from(MAX)).contains(&v) {
                        Ok(FloatOrInt(v))
                    } else {
                        ctx.emit_error(DecodeError::conversion(
                            val,
                            format!("value must be between {MIN} and {MAX}"),
                        ));
                        Ok(FloatOrInt::default())
                    }
                }
                Err(e) => {
                    ctx.emit_error(DecodeError::conversion(val, e));
                    Ok(FloatOrInt::default())
                }
            },
            _ => {
                ctx.emit_error(DecodeError::scalar_kind(
                    knuffel::decode::Kind::Int,
                    val,
                ));
                Ok(FloatOrInt::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[track_caller]
    fn do_parse(text: &str) -> Config {
        Config::parse("test.kdl", text)
            .map_err(miette::Report::new)
            .unwrap()
    }

    #[test]
    fn default_config_is_parsable() {
        let parsed = do_parse(DEFAULT_CONFIG);
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(do_parse(""), Config::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let parsed = do_parse(
            r#"
            drag {
                distance-multiple 1
            }
            preview {
                show-delay-ms 150
                composited false
            }
            "#,
        );

        assert_eq!(
            parsed,
            Config {
                drag: Drag {
                    distance_multiple: FloatOrInt(1.),
                    ..Drag::default()
                },
                preview: Preview {
                    show_delay_ms: 150,
                    leave_delay_ms: 300,
                    composited: false,
                },
            }
        );
    }

    #[test]
    fn decimal_threshold() {
        let parsed = do_parse("drag { start-threshold 12.5; }");
        assert_eq!(parsed.drag.start_threshold, FloatOrInt(12.5));
    }

    #[test]
    fn out_of_range_multiple_is_an_error() {
        assert!(Config::parse("test.kdl", "drag { distance-multiple 500; }").is_err());
        assert!(Config::parse("test.kdl", "drag { distance-multiple -1; }").is_err());
    }

    #[test]
    fn unknown_node_is_an_error() {
        assert!(Config::parse("test.kdl", "popup { show-delay-ms 1; }").is_err());
    }

    #[test]
    fn default_snapshot() {
        insta::assert_debug_snapshot!(Config::default(), @r"
        Config {
            drag: Drag {
                start_threshold: FloatOrInt(
                    20.0,
                ),
                distance_multiple: FloatOrInt(
                    1.5,
                ),
                go_back_duration_ms: 300,
                remove_animation_duration_ms: 300,
            },
            preview: Preview {
                show_delay_ms: 200,
                leave_delay_ms: 300,
                composited: true,
            },
        }
        ");
    }
}
