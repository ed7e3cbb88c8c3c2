//! Edge splitting
//!
//! Each selected edge gets one cut. Faces using a split edge pick up the new
//! vertex, so delta, polar and percent splits refuse to run with a face
//! selected.

use pdt_mesh::GeomSet;

use crate::args::ParsedCommand;
use crate::context::CommandContext;
use crate::error::CmdResult;
use crate::guards;
use crate::outcome::Outcome;

/// Split the single selected edge at a world position
pub(super) fn absolute(ctx: &mut CommandContext<'_>, cmd: &ParsedCommand) -> CmdResult<Outcome> {
    let edge = guards::require_single_edge(&ctx.selection)?;
    let origin = ctx.selection.origin();
    let target = ctx.resolve(cmd)?;

    let created = ctx.doc.subdivide_edges(&[edge], 1)?;
    let created = GeomSet::vertices(created.into_iter().take(1));
    for &v in &created.verts {
        ctx.doc.set_vertex_position(v, target - origin)?;
    }
    ctx.doc.set_selection(&created)?;
    ctx.doc.clear_history()?;
    Ok(Outcome::GeometryCreated(created))
}

/// Split every selected edge and offset the new vertices, leaving nothing
/// selected
pub(super) fn relative(ctx: &mut CommandContext<'_>, cmd: &ParsedCommand) -> CmdResult<Outcome> {
    let edges = guards::require_splittable_edges(&ctx.selection)?.to_vec();
    let offset = ctx.resolve(cmd)?;

    let created = ctx.doc.subdivide_edges(&edges, 1)?;
    ctx.doc.translate(&created, offset)?;
    ctx.doc.set_selection(&GeomSet::new())?;
    ctx.doc.clear_history()?;
    Ok(Outcome::GeometryCreated(GeomSet::vertices(created)))
}

/// Split every selected edge and move the first new vertex to a percent point
pub(super) fn percent(ctx: &mut CommandContext<'_>, cmd: &ParsedCommand) -> CmdResult<Outcome> {
    let edges = guards::require_splittable_edges(&ctx.selection)?.to_vec();
    let point = ctx.resolve(cmd)?;

    let created = ctx.doc.subdivide_edges(&edges, 1)?;
    let first = GeomSet::vertices(created.into_iter().take(1));
    for &v in &first.verts {
        ctx.doc.set_vertex_position(v, point)?;
    }
    ctx.doc.set_selection(&first)?;
    ctx.doc.clear_history()?;
    Ok(Outcome::GeometryCreated(first))
}
