//! Region extrusion and duplication

use lin_alg::f64::Vec3;
use pdt_mesh::GeomSet;

use crate::args::ParsedCommand;
use crate::context::CommandContext;
use crate::error::CmdResult;
use crate::guards;
use crate::outcome::Outcome;

/// Offset new region geometry and make it the selection
fn place_region(ctx: &mut CommandContext<'_>, created: GeomSet, offset: Vec3) -> CmdResult<Outcome> {
    ctx.doc.translate(&created.verts, offset)?;
    ctx.doc.set_selection(&created)?;
    ctx.doc.clear_history()?;
    Ok(Outcome::GeometryCreated(created))
}

/// Extrude the selection as one region
pub(super) fn extrude(ctx: &mut CommandContext<'_>, cmd: &ParsedCommand) -> CmdResult<Outcome> {
    guards::require_vertices(&ctx.selection)?;
    let region = ctx.selection.region();
    let offset = ctx.resolve(cmd)?;
    let created = ctx.doc.extrude_region(&region)?;
    place_region(ctx, created, offset)
}

/// Copy the selection, offset the copy and select it
pub(super) fn duplicate(ctx: &mut CommandContext<'_>, cmd: &ParsedCommand) -> CmdResult<Outcome> {
    guards::require_vertices(&ctx.selection)?;
    let region = ctx.selection.region();
    let offset = ctx.resolve(cmd)?;
    let created = ctx.doc.duplicate_region(&region)?;
    place_region(ctx, created, offset)
}
