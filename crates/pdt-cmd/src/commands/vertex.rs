//! New vertices and vertex extrusion

use pdt_mesh::{GeomSet, VertexIndex};

use crate::args::{Mode, ParsedCommand};
use crate::context::CommandContext;
use crate::error::{CmdError, CmdResult};
use crate::guards;
use crate::outcome::Outcome;

use super::MERGE_DISTANCE;

/// Make `created` the only selection and drop the history
fn select_only(ctx: &mut CommandContext<'_>, created: GeomSet) -> CmdResult<Outcome> {
    ctx.doc.set_selection(&created)?;
    ctx.doc.clear_history()?;
    Ok(Outcome::GeometryCreated(created))
}

/// Object-local position of the active vertex
fn active_vertex_position(ctx: &CommandContext<'_>) -> CmdResult<lin_alg::f64::Vec3> {
    let vertex = guards::require_active_vertex(&ctx.selection)?;
    ctx.doc
        .vertex_position(vertex)
        .ok_or(CmdError::NoActiveVertex)
}

/// Add a lone vertex
///
/// Absolute input is a world position, delta and polar input offset the
/// active vertex, percent input is already object-local.
pub(super) fn new_vertex(ctx: &mut CommandContext<'_>, cmd: &ParsedCommand) -> CmdResult<Outcome> {
    let origin = ctx.selection.origin();
    let v = ctx.resolve(cmd)?;
    let co = match cmd.mode {
        Mode::Absolute => v - origin,
        Mode::Delta | Mode::Polar => active_vertex_position(ctx)? + v,
        Mode::Percent => v,
    };
    let created = ctx.doc.new_vertex(co)?;
    select_only(ctx, GeomSet::vertex(created))
}

/// One new vertex at a world position, joined to every selected vertex
///
/// A new vertex landing on a selected original is welded into the closest
/// one; originals are never merged with each other.
pub(super) fn extrude_absolute(
    ctx: &mut CommandContext<'_>,
    cmd: &ParsedCommand,
) -> CmdResult<Outcome> {
    let originals = ctx.selection.verts.clone();
    let origin = ctx.selection.origin();
    let target = ctx.resolve(cmd)?;
    let local = target - origin;

    let created = ctx.doc.new_vertex(local)?;
    for &v in &originals {
        ctx.doc.new_edge(v, created)?;
    }
    ctx.doc.set_selection(&GeomSet::vertex(created))?;

    let tol_sq = MERGE_DISTANCE * MERGE_DISTANCE;
    let landing = originals
        .iter()
        .filter_map(|&v| {
            let co = ctx.doc.vertex_position(v)?;
            Some((v, (co - local).magnitude_squared()))
        })
        .filter(|&(_, dist_sq)| dist_sq <= tol_sq)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(v, _)| v);
    if let Some(v) = landing {
        ctx.doc.merge_near(&[v, created], MERGE_DISTANCE)?;
    }
    ctx.doc.clear_history()?;

    // merging may have renumbered the new vertex
    let selected = ctx.doc.selected_vertices();
    Ok(Outcome::GeometryCreated(GeomSet::vertices(selected)))
}

/// One new vertex per selected vertex, offset from it and joined to it
pub(super) fn extrude_relative(
    ctx: &mut CommandContext<'_>,
    cmd: &ParsedCommand,
) -> CmdResult<Outcome> {
    let sources = guards::require_vertices(&ctx.selection)?.to_vec();
    let offset = ctx.resolve(cmd)?;

    let mut created: Vec<VertexIndex> = Vec::with_capacity(sources.len());
    for &v in &sources {
        let co = ctx.doc.vertex_position(v).ok_or(CmdError::NothingSelected)?;
        let nv = ctx.doc.new_vertex(co + offset)?;
        ctx.doc.new_edge(v, nv)?;
        created.push(nv);
    }
    select_only(ctx, GeomSet::vertices(created))
}

/// One new vertex at a percent point
///
/// With edge extension on it joins every selected vertex, otherwise only the
/// active vertex.
pub(super) fn extrude_percent(
    ctx: &mut CommandContext<'_>,
    cmd: &ParsedCommand,
) -> CmdResult<Outcome> {
    let selected = guards::require_vertices(&ctx.selection)?.to_vec();
    let sources = if ctx.settings.extend_edge_on_extrude {
        selected
    } else {
        vec![guards::require_active_vertex(&ctx.selection)?]
    };
    let point = ctx.resolve(cmd)?;

    let created = ctx.doc.new_vertex(point)?;
    for &v in &sources {
        ctx.doc.new_edge(v, created)?;
    }
    select_only(ctx, GeomSet::vertex(created))
}
