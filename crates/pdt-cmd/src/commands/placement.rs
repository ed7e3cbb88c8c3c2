//! Cursor and pivot placement

use lin_alg::f64::Vec3;
use pdt_settings::ReferenceMode;

use crate::args::{Opcode, ParsedCommand};
use crate::context::CommandContext;
use crate::error::{CmdError, CmdResult};
use crate::guards;
use crate::outcome::Outcome;

fn current(ctx: &CommandContext<'_>, opcode: Opcode) -> Vec3 {
    match opcode {
        Opcode::Cursor => ctx.doc.cursor_location(),
        _ => ctx.settings.pivot_location,
    }
}

fn place(ctx: &mut CommandContext<'_>, opcode: Opcode, location: Vec3) -> Outcome {
    match opcode {
        Opcode::Cursor => {
            ctx.doc.set_cursor_location(location);
            Outcome::CursorPlaced(location)
        }
        _ => {
            ctx.settings.pivot_location = location;
            Outcome::PivotPlaced(location)
        }
    }
}

pub(super) fn absolute(ctx: &mut CommandContext<'_>, cmd: &ParsedCommand) -> CmdResult<Outcome> {
    let location = ctx.resolve(cmd)?;
    Ok(place(ctx, cmd.opcode, location))
}

/// Delta and polar input, offset from the reference the settings choose
pub(super) fn relative(ctx: &mut CommandContext<'_>, cmd: &ParsedCommand) -> CmdResult<Outcome> {
    let offset = ctx.resolve(cmd)?;
    let base = match ctx.settings.reference_mode {
        ReferenceMode::Relative => current(ctx, cmd.opcode),
        ReferenceMode::SelectionRelative => {
            let active = guards::require_active_object(&ctx.selection)?;
            if active.is_editing() {
                let vertex = guards::require_active_vertex(&ctx.selection)?;
                let co = ctx
                    .doc
                    .vertex_position(vertex)
                    .ok_or(CmdError::NoActiveVertex)?;
                co + active.origin
            } else {
                active.origin
            }
        }
    };
    Ok(place(ctx, cmd.opcode, base + offset))
}

pub(super) fn percent(ctx: &mut CommandContext<'_>, cmd: &ParsedCommand) -> CmdResult<Outcome> {
    let active = guards::require_active_object(&ctx.selection)?;
    let point = ctx.resolve(cmd)?;
    // edit-mode percent points are object-local
    let location = if active.is_editing() {
        active.origin + point
    } else {
        point
    };
    Ok(place(ctx, cmd.opcode, location))
}
