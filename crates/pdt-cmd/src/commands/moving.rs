//! Moving selected vertices or objects

use crate::args::ParsedCommand;
use crate::context::CommandContext;
use crate::error::CmdResult;
use crate::guards;
use crate::outcome::Outcome;

use super::MERGE_DISTANCE;

/// Put every selected vertex or object at one location
///
/// Vertices landing on the same spot are merged.
pub(super) fn absolute(ctx: &mut CommandContext<'_>, cmd: &ParsedCommand) -> CmdResult<Outcome> {
    let active = guards::require_active_object(&ctx.selection)?;

    if active.is_editing() {
        let verts = guards::require_vertices(&ctx.selection)?.to_vec();
        let target = ctx.resolve(cmd)?;
        let local = target - active.origin;
        for &v in &verts {
            ctx.doc.set_vertex_position(v, local)?;
        }
        let merged = ctx.doc.merge_near(&verts, MERGE_DISTANCE)?;
        ctx.doc.clear_history()?;
        log::debug!("Moved {} vertices, merged {}", verts.len(), merged);
        Ok(Outcome::VerticesMoved(verts.len()))
    } else {
        let objects = guards::require_objects(&ctx.selection)?.to_vec();
        let target = ctx.resolve(cmd)?;
        for &object in &objects {
            ctx.doc.set_object_location(object, target)?;
        }
        Ok(Outcome::ObjectsMoved(objects.len()))
    }
}

/// Offset every selected vertex or object
pub(super) fn relative(ctx: &mut CommandContext<'_>, cmd: &ParsedCommand) -> CmdResult<Outcome> {
    let active = guards::require_active_object(&ctx.selection)?;

    if active.is_editing() {
        let verts = guards::require_vertices(&ctx.selection)?.to_vec();
        let offset = ctx.resolve(cmd)?;
        ctx.doc.translate(&verts, offset)?;
        ctx.doc.clear_history()?;
        Ok(Outcome::VerticesMoved(verts.len()))
    } else {
        let objects = guards::require_objects(&ctx.selection)?.to_vec();
        let offset = ctx.resolve(cmd)?;
        for &object in &objects {
            if let Some(location) = ctx.doc.object_location(object) {
                ctx.doc.set_object_location(object, location + offset)?;
            }
        }
        Ok(Outcome::ObjectsMoved(objects.len()))
    }
}

/// Place the active object at a percent point between two selected objects
pub(super) fn percent(ctx: &mut CommandContext<'_>, cmd: &ParsedCommand) -> CmdResult<Outcome> {
    let active = guards::require_active_object(&ctx.selection)?;
    guards::require_objects(&ctx.selection)?;
    let point = ctx.resolve(cmd)?;
    ctx.doc.set_object_location(active.index, point)?;
    Ok(Outcome::ObjectsMoved(1))
}
