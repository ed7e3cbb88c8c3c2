//! Command structures: opcodes, addressing modes and parsed commands

use std::fmt;

use lin_alg::f64::Vec3;
use pdt_mesh::PercentTarget;

use crate::error::{CmdError, CmdResult};

/// First command letter: what the command acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `C` - place the 3D cursor
    Cursor,
    /// `D` - duplicate selected geometry
    Duplicate,
    /// `E` - extrude selected geometry
    ExtrudeGeometry,
    /// `G` - move ("grab") vertices or objects
    Move,
    /// `N` - add a new vertex
    NewVertex,
    /// `P` - place the pivot point
    Pivot,
    /// `S` - split selected edges
    SplitEdge,
    /// `V` - extrude vertices only
    ExtrudeVertex,
}

impl Opcode {
    pub const ALL: [Opcode; 8] = [
        Opcode::Cursor,
        Opcode::Duplicate,
        Opcode::ExtrudeGeometry,
        Opcode::Move,
        Opcode::NewVertex,
        Opcode::Pivot,
        Opcode::SplitEdge,
        Opcode::ExtrudeVertex,
    ];

    /// Decode a command letter, ignoring case
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Opcode::Cursor),
            'D' => Some(Opcode::Duplicate),
            'E' => Some(Opcode::ExtrudeGeometry),
            'G' => Some(Opcode::Move),
            'N' => Some(Opcode::NewVertex),
            'P' => Some(Opcode::Pivot),
            'S' => Some(Opcode::SplitEdge),
            'V' => Some(Opcode::ExtrudeVertex),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Opcode::Cursor => 'C',
            Opcode::Duplicate => 'D',
            Opcode::ExtrudeGeometry => 'E',
            Opcode::Move => 'G',
            Opcode::NewVertex => 'N',
            Opcode::Pivot => 'P',
            Opcode::SplitEdge => 'S',
            Opcode::ExtrudeVertex => 'V',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Opcode::Cursor => "cursor",
            Opcode::Duplicate => "duplicate",
            Opcode::ExtrudeGeometry => "extrude geometry",
            Opcode::Move => "move",
            Opcode::NewVertex => "new vertex",
            Opcode::Pivot => "pivot",
            Opcode::SplitEdge => "split edges",
            Opcode::ExtrudeVertex => "extrude vertices",
        }
    }

    /// Whether the opcode only works on a mesh in edit mode
    pub fn is_edit_only(&self) -> bool {
        matches!(
            self,
            Opcode::NewVertex
                | Opcode::SplitEdge
                | Opcode::ExtrudeVertex
                | Opcode::ExtrudeGeometry
                | Opcode::Duplicate
        )
    }

    /// Whether the opcode accepts the addressing mode
    pub fn supports(&self, mode: Mode) -> bool {
        match self {
            Opcode::ExtrudeGeometry | Opcode::Duplicate => {
                matches!(mode, Mode::Delta | Mode::Polar)
            }
            _ => true,
        }
    }

    /// What a percent point computed for this opcode is applied to
    pub fn percent_target(&self) -> PercentTarget {
        match self {
            Opcode::Cursor => PercentTarget::Cursor,
            Opcode::Pivot => PercentTarget::Pivot,
            Opcode::Move => PercentTarget::Object,
            _ => PercentTarget::Vertex,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Second command letter: how the arguments become a vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// `A` - world coordinates `x,y,z`
    Absolute,
    /// `D` - offset `dx,dy,dz`
    Delta,
    /// `I` - offset `distance,angle` in the working plane
    Polar,
    /// `P` - `percent` along the selected reference
    Percent,
}

impl Mode {
    /// Decode a mode letter, ignoring case
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Mode::Absolute),
            'D' => Some(Mode::Delta),
            'I' => Some(Mode::Polar),
            'P' => Some(Mode::Percent),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Mode::Absolute => 'A',
            Mode::Delta => 'D',
            Mode::Polar => 'I',
            Mode::Percent => 'P',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Absolute => "absolute",
            Mode::Delta => "delta",
            Mode::Polar => "distance-angle",
            Mode::Percent => "percent",
        }
    }

    /// Number of numeric arguments the mode takes
    pub fn arg_count(&self) -> usize {
        match self {
            Mode::Absolute | Mode::Delta => 3,
            Mode::Polar => 2,
            Mode::Percent => 1,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tokenized command
///
/// The argument count is not checked at parse time; call
/// [`check_arg_count`](Self::check_arg_count) before reading arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    pub opcode: Opcode,
    pub mode: Mode,
    pub args: Vec<f64>,
}

impl ParsedCommand {
    pub fn new(opcode: Opcode, mode: Mode) -> Self {
        Self {
            opcode,
            mode,
            args: Vec::new(),
        }
    }

    /// Builder: append an argument
    pub fn with_arg(mut self, value: f64) -> Self {
        self.args.push(value);
        self
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    pub fn get_float(&self, index: usize) -> Option<f64> {
        self.args.get(index).copied()
    }

    pub fn get_float_or(&self, index: usize, default: f64) -> f64 {
        self.get_float(index).unwrap_or(default)
    }

    /// Fail unless the mode's argument count is met exactly
    pub fn check_arg_count(&self) -> CmdResult<()> {
        let expected = self.mode.arg_count();
        if self.args.len() == expected {
            Ok(())
        } else {
            Err(CmdError::WrongArgCount {
                mode: self.mode,
                expected,
                got: self.args.len(),
            })
        }
    }

    /// The first three arguments as a vector
    pub fn vector(&self) -> Vec3 {
        Vec3::new(
            self.get_float_or(0, 0.0),
            self.get_float_or(1, 0.0),
            self.get_float_or(2, 0.0),
        )
    }
}

impl fmt::Display for ParsedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.opcode.letter(), self.mode.letter())?;
        for (i, value) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_letters_round_trip() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::from_char(op.letter()), Some(op));
            assert_eq!(
                Opcode::from_char(op.letter().to_ascii_lowercase()),
                Some(op)
            );
        }
        assert_eq!(Opcode::from_char('X'), None);
    }

    #[test]
    fn test_supported_modes() {
        assert!(Opcode::Cursor.supports(Mode::Percent));
        assert!(!Opcode::Duplicate.supports(Mode::Absolute));
        assert!(!Opcode::ExtrudeGeometry.supports(Mode::Percent));
        assert!(Opcode::ExtrudeGeometry.supports(Mode::Polar));
    }

    #[test]
    fn test_check_arg_count() {
        let cmd = ParsedCommand::new(Opcode::Cursor, Mode::Polar).with_arg(1.0);
        assert_eq!(
            cmd.check_arg_count(),
            Err(CmdError::WrongArgCount {
                mode: Mode::Polar,
                expected: 2,
                got: 1
            })
        );
        assert!(cmd.with_arg(45.0).check_arg_count().is_ok());
    }

    #[test]
    fn test_display() {
        let cmd = ParsedCommand::new(Opcode::Move, Mode::Delta)
            .with_arg(1.0)
            .with_arg(-2.5)
            .with_arg(0.0);
        assert_eq!(cmd.to_string(), "GD1,-2.5,0");
    }
}
