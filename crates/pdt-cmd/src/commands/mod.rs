//! Command implementations
//!
//! One handler per (opcode, mode) cell, grouped by what they act on. The
//! dispatcher runs the shared preconditions first; handlers then check their
//! own selection requirements, resolve the vector and apply the edit.

mod moving;
mod placement;
mod region;
mod split;
mod vertex;

use crate::args::{Mode, Opcode, ParsedCommand};
use crate::context::CommandContext;
use crate::error::CmdResult;
use crate::guards;
use crate::outcome::Outcome;

/// Merge distance used after absolute moves and vertex extrusion
pub const MERGE_DISTANCE: f64 = 0.0001;

/// Validate and run a parsed command
pub fn dispatch(ctx: &mut CommandContext<'_>, cmd: &ParsedCommand) -> CmdResult<Outcome> {
    guards::preflight(cmd, &ctx.selection, ctx.settings)?;
    log::debug!("Dispatching {} ({} {})", cmd, cmd.opcode, cmd.mode);

    match (cmd.opcode, cmd.mode) {
        (Opcode::Cursor | Opcode::Pivot, Mode::Absolute) => placement::absolute(ctx, cmd),
        (Opcode::Cursor | Opcode::Pivot, Mode::Delta | Mode::Polar) => {
            placement::relative(ctx, cmd)
        }
        (Opcode::Cursor | Opcode::Pivot, Mode::Percent) => placement::percent(ctx, cmd),

        (Opcode::Move, Mode::Absolute) => moving::absolute(ctx, cmd),
        (Opcode::Move, Mode::Delta | Mode::Polar) => moving::relative(ctx, cmd),
        (Opcode::Move, Mode::Percent) => moving::percent(ctx, cmd),

        (Opcode::NewVertex, _) => vertex::new_vertex(ctx, cmd),

        (Opcode::ExtrudeVertex, Mode::Absolute) => vertex::extrude_absolute(ctx, cmd),
        (Opcode::ExtrudeVertex, Mode::Delta | Mode::Polar) => vertex::extrude_relative(ctx, cmd),
        (Opcode::ExtrudeVertex, Mode::Percent) => vertex::extrude_percent(ctx, cmd),

        (Opcode::SplitEdge, Mode::Absolute) => split::absolute(ctx, cmd),
        (Opcode::SplitEdge, Mode::Delta | Mode::Polar) => split::relative(ctx, cmd),
        (Opcode::SplitEdge, Mode::Percent) => split::percent(ctx, cmd),

        // preflight has rejected the other modes
        (Opcode::ExtrudeGeometry, _) => region::extrude(ctx, cmd),
        (Opcode::Duplicate, _) => region::duplicate(ctx, cmd),
    }
}
