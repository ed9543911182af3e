//! Elixir term conversion
//!
//! Decodes view options from an Elixir map and builds the `{:ok, _}` /
//! `{:error, _}` tuples the NIFs return.

use rustler::{Atom, Encoder, Env, NewBinary, NifResult, Term};

use crate::error::Error;
use crate::options::{ChunkBy, ViewOptions};
use crate::slider::LevelChange;

rustler::atoms! {
    ok,
    error,
    nil,
    // option keys
    section_prefix,
    first_section_id,
    heading_tag,
    chunk_heading_tag,
    chunk_by,
    strict,
    // chunk_by values
    secondary_heading,
    level,
    // error reasons
    unknown_control,
    no_sections,
    uneven_sections,
    state_poisoned,
}

/// Decode `%{section_prefix: ..., chunk_by: :level, ...}`.
///
/// Every key is optional; `nil` or an empty map gives the defaults.
/// Values of the wrong type are a `badarg`.
pub fn decode_options(term: Term<'_>) -> NifResult<ViewOptions> {
    let mut options = ViewOptions::default();
    if term.is_atom() && term.decode::<Atom>()? == nil() {
        return Ok(options);
    }
    if !term.is_map() {
        return Err(rustler::Error::BadArg);
    }

    if let Some(value) = map_value(term, section_prefix()) {
        options = options.with_section_prefix(&value.decode::<String>()?);
    }
    if let Some(value) = map_value(term, first_section_id()) {
        options = options.with_first_section_id(&value.decode::<String>()?);
    }
    if let Some(value) = map_value(term, heading_tag()) {
        options = options.with_heading_tag(&value.decode::<String>()?);
    }
    if let Some(value) = map_value(term, chunk_heading_tag()) {
        options = options.with_chunk_heading_tag(&value.decode::<String>()?);
    }
    if let Some(value) = map_value(term, chunk_by()) {
        options = options.with_chunk_by(decode_chunk_by(value)?);
    }
    if let Some(value) = map_value(term, strict()) {
        options = options.with_strict(value.decode::<bool>()?);
    }
    Ok(options)
}

fn map_value<'a>(map: Term<'a>, key: Atom) -> Option<Term<'a>> {
    map.map_get(key.to_term(map.get_env())).ok()
}

fn decode_chunk_by(term: Term<'_>) -> NifResult<ChunkBy> {
    let atom = term.decode::<Atom>()?;
    if atom == secondary_heading() {
        Ok(ChunkBy::SecondaryHeading)
    } else if atom == level() {
        Ok(ChunkBy::Level)
    } else {
        Err(rustler::Error::BadArg)
    }
}

/// `{:ok, value}`
pub fn ok_tuple<'a>(env: Env<'a>, value: impl Encoder) -> Term<'a> {
    (ok(), value).encode(env)
}

/// `{:error, {reason, message}}`
pub fn error_tuple<'a>(env: Env<'a>, err: &Error) -> Term<'a> {
    let reason = match err {
        Error::UnknownControl(_) => unknown_control(),
        Error::NoSections { .. } => no_sections(),
        Error::UnevenSections { .. } => uneven_sections(),
        Error::StatePoisoned => state_poisoned(),
    };
    (error(), (reason, err.to_string())).encode(env)
}

/// `{section, previous, current}`, zero-based
pub fn change_to_term<'a>(env: Env<'a>, change: LevelChange) -> Term<'a> {
    (change.section, change.previous, change.current).encode(env)
}

/// Convert a string to a binary term
#[inline]
pub fn str_to_binary<'a>(env: Env<'a>, s: &str) -> Term<'a> {
    let bytes = s.as_bytes();
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}
