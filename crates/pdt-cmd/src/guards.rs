//! Precondition checks shared by the command handlers
//!
//! Every check reads the captured [`SelectionContext`] and returns the first
//! failure, before any handler touches the document.

use pdt_mesh::{ActiveObject, EdgeIndex, ObjectIndex, VertexIndex};
use pdt_settings::SceneSettings;

use crate::args::{Mode, Opcode, ParsedCommand};
use crate::context::SelectionContext;
use crate::error::{CmdError, CmdResult};

/// Checks common to every command, in order: supported mode, argument count,
/// active object, edit mode, active vertex
pub fn preflight(
    cmd: &ParsedCommand,
    selection: &SelectionContext,
    settings: &SceneSettings,
) -> CmdResult<()> {
    if !cmd.opcode.supports(cmd.mode) {
        return Err(CmdError::UnsupportedMode {
            opcode: cmd.opcode,
            mode: cmd.mode,
        });
    }
    cmd.check_arg_count()?;

    let placement = matches!(cmd.opcode, Opcode::Cursor | Opcode::Pivot);
    let active = match selection.active {
        Some(active) => active,
        None if placement && cmd.mode == Mode::Absolute => return Ok(()),
        None => return Err(CmdError::NoActiveObject),
    };

    require_mode(cmd, &active)?;

    let needs_active_vertex = match cmd.opcode {
        Opcode::Cursor | Opcode::Pivot | Opcode::NewVertex => {
            active.is_editing() && cmd.mode != Mode::Absolute
        }
        Opcode::ExtrudeVertex => cmd.mode == Mode::Percent && !settings.extend_edge_on_extrude,
        _ => false,
    };
    if needs_active_vertex {
        require_active_vertex(selection)?;
    }
    Ok(())
}

fn require_mode(cmd: &ParsedCommand, active: &ActiveObject) -> CmdResult<()> {
    let wrong = if cmd.opcode.is_edit_only() {
        !active.is_editing()
    } else {
        // percent moves only place whole objects
        cmd.opcode == Opcode::Move && cmd.mode == Mode::Percent && active.is_editing()
    };
    if wrong {
        Err(CmdError::wrong_mode(cmd.opcode, active.mode))
    } else {
        Ok(())
    }
}

pub fn require_active_object(selection: &SelectionContext) -> CmdResult<ActiveObject> {
    selection.active.ok_or(CmdError::NoActiveObject)
}

pub fn require_active_vertex(selection: &SelectionContext) -> CmdResult<VertexIndex> {
    selection.active_vertex().ok_or(CmdError::NoActiveVertex)
}

/// At least one selected vertex
pub fn require_vertices(selection: &SelectionContext) -> CmdResult<&[VertexIndex]> {
    if selection.verts.is_empty() {
        Err(CmdError::NothingSelected)
    } else {
        Ok(&selection.verts)
    }
}

/// At least one selected object
pub fn require_objects(selection: &SelectionContext) -> CmdResult<&[ObjectIndex]> {
    if selection.objects.is_empty() {
        Err(CmdError::NothingSelected)
    } else {
        Ok(&selection.objects)
    }
}

pub fn require_single_edge(selection: &SelectionContext) -> CmdResult<EdgeIndex> {
    match selection.edges.as_slice() {
        [edge] => Ok(*edge),
        edges => Err(CmdError::WrongEdgeCount(edges.len())),
    }
}

/// Edges to split without breaking faces: no face selected and at least one edge
pub fn require_splittable_edges(selection: &SelectionContext) -> CmdResult<&[EdgeIndex]> {
    if !selection.faces.is_empty() {
        return Err(CmdError::FaceSelected);
    }
    if selection.edges.is_empty() {
        return Err(CmdError::NoEdgesSelected);
    }
    Ok(&selection.edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lin_alg::f64::Vec3;
    use pdt_mesh::{FaceIndex, ObjectMode};

    fn editing() -> SelectionContext {
        SelectionContext {
            active: Some(ActiveObject {
                index: ObjectIndex(0),
                mode: ObjectMode::Edit,
                origin: Vec3::new_zero(),
            }),
            ..SelectionContext::default()
        }
    }

    fn cmd(opcode: Opcode, mode: Mode) -> ParsedCommand {
        let mut cmd = ParsedCommand::new(opcode, mode);
        cmd.args = vec![0.0; mode.arg_count()];
        cmd
    }

    #[test]
    fn test_unsupported_before_arg_count() {
        let settings = SceneSettings::default();
        let bad = ParsedCommand::new(Opcode::Duplicate, Mode::Absolute);
        assert!(matches!(
            preflight(&bad, &editing(), &settings),
            Err(CmdError::UnsupportedMode { .. })
        ));
    }

    #[test]
    fn test_cursor_absolute_needs_no_object() {
        let settings = SceneSettings::default();
        let none = SelectionContext::default();
        assert!(preflight(&cmd(Opcode::Cursor, Mode::Absolute), &none, &settings).is_ok());
        assert_eq!(
            preflight(&cmd(Opcode::Cursor, Mode::Delta), &none, &settings),
            Err(CmdError::NoActiveObject)
        );
    }

    #[test]
    fn test_active_vertex_rules() {
        let mut settings = SceneSettings::default();
        let sel = editing();
        assert_eq!(
            preflight(&cmd(Opcode::NewVertex, Mode::Delta), &sel, &settings),
            Err(CmdError::NoActiveVertex)
        );
        assert!(preflight(&cmd(Opcode::NewVertex, Mode::Absolute), &sel, &settings).is_ok());
        assert_eq!(
            preflight(&cmd(Opcode::ExtrudeVertex, Mode::Percent), &sel, &settings),
            Err(CmdError::NoActiveVertex)
        );
        settings.extend_edge_on_extrude = true;
        assert!(preflight(&cmd(Opcode::ExtrudeVertex, Mode::Percent), &sel, &settings).is_ok());
    }

    #[test]
    fn test_move_percent_in_edit_mode() {
        let settings = SceneSettings::default();
        assert!(matches!(
            preflight(&cmd(Opcode::Move, Mode::Percent), &editing(), &settings),
            Err(CmdError::WrongMode { .. })
        ));
    }

    #[test]
    fn test_split_guards() {
        let mut sel = editing();
        sel.edges = vec![EdgeIndex(0), EdgeIndex(1)];
        assert_eq!(require_single_edge(&sel), Err(CmdError::WrongEdgeCount(2)));
        assert!(require_splittable_edges(&sel).is_ok());

        sel.faces = vec![FaceIndex(0)];
        assert_eq!(require_splittable_edges(&sel), Err(CmdError::FaceSelected));

        sel.faces.clear();
        sel.edges.clear();
        assert_eq!(require_single_edge(&sel), Err(CmdError::WrongEdgeCount(0)));
        assert_eq!(require_splittable_edges(&sel), Err(CmdError::NoEdgesSelected));
    }
}
