//! mms simulator stdio client.
//!
//! The simulator speaks a line-oriented text protocol: commands are written
//! to stdout, replies arrive on stdin. Queries (`wallFront`, `wasReset`, ...)
//! produce exactly one reply line; display commands (`setColor`, `setText`,
//! `setWall`) produce none. `moveForward` answers `ack` on success and
//! `crash` when the mouse is blocked.

use std::io::{BufRead, BufReader, Stdin, Stdout, Write};

use crate::error::{MushakError, Result};
use crate::maze::{CellCoord, Direction};

/// Robot collaborator contract: wall sensing relative to the current facing,
/// turn/move actuation, external reset signaling, and side-effecting display
/// calls. The navigation core consumes this seam; it never implements the
/// physical side itself.
pub trait MouseIo {
    fn wall_front(&mut self) -> Result<bool>;
    fn wall_right(&mut self) -> Result<bool>;
    fn wall_left(&mut self) -> Result<bool>;

    /// Rotate the mouse 90° counter-clockwise. Assumed always to succeed.
    fn turn_left(&mut self) -> Result<()>;
    /// Rotate the mouse 90° clockwise. Assumed always to succeed.
    fn turn_right(&mut self) -> Result<()>;
    /// Advance one cell in the facing direction. Returns `false` if the
    /// mouse was blocked; position is unchanged in that case.
    fn move_forward(&mut self) -> Result<bool>;

    fn was_reset(&mut self) -> Result<bool>;
    fn ack_reset(&mut self) -> Result<()>;

    // Display calls: visualization only, nothing is read back.
    fn set_text(&mut self, cell: CellCoord, text: &str) -> Result<()>;
    fn set_color(&mut self, cell: CellCoord, color: char) -> Result<()>;
    fn clear_all_color(&mut self) -> Result<()>;
    fn set_wall(&mut self, cell: CellCoord, dir: Direction) -> Result<()>;
}

/// Client for the mms simulator's stdin/stdout protocol.
pub struct MmsClient<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl MmsClient<BufReader<Stdin>, Stdout> {
    /// Client over the process's own stdio, the way the simulator launches
    /// solvers.
    pub fn from_stdio() -> Self {
        Self::new(BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> MmsClient<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Maze width in cells, as reported by the simulator.
    pub fn maze_width(&mut self) -> Result<usize> {
        self.query_int("mazeWidth")
    }

    /// Maze height in cells, as reported by the simulator.
    pub fn maze_height(&mut self) -> Result<usize> {
        self.query_int("mazeHeight")
    }

    /// Send a command that produces no reply.
    fn command(&mut self, cmd: &str) -> Result<()> {
        writeln!(self.writer, "{}", cmd)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Send a command and read its single reply line.
    fn query(&mut self, cmd: &str) -> Result<String> {
        self.command(cmd)?;
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            return Err(MushakError::Protocol(format!(
                "simulator closed the stream during '{}'",
                cmd
            )));
        }
        Ok(line.trim().to_string())
    }

    fn query_bool(&mut self, cmd: &str) -> Result<bool> {
        match self.query(cmd)?.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(MushakError::Protocol(format!(
                "expected true/false for '{}', got '{}'",
                cmd, other
            ))),
        }
    }

    fn query_int(&mut self, cmd: &str) -> Result<usize> {
        let reply = self.query(cmd)?;
        reply.parse().map_err(|_| {
            MushakError::Protocol(format!("expected integer for '{}', got '{}'", cmd, reply))
        })
    }

    /// Send a command and require the `ack` reply.
    fn query_ack(&mut self, cmd: &str) -> Result<()> {
        let reply = self.query(cmd)?;
        if reply == "ack" {
            Ok(())
        } else {
            Err(MushakError::Protocol(format!(
                "expected ack for '{}', got '{}'",
                cmd, reply
            )))
        }
    }

    #[cfg(test)]
    pub(crate) fn into_writer(self) -> W {
        self.writer
    }

    fn direction_char(dir: Direction) -> char {
        match dir {
            Direction::North => 'n',
            Direction::East => 'e',
            Direction::South => 's',
            Direction::West => 'w',
        }
    }
}

impl<R: BufRead, W: Write> MouseIo for MmsClient<R, W> {
    fn wall_front(&mut self) -> Result<bool> {
        self.query_bool("wallFront")
    }

    fn wall_right(&mut self) -> Result<bool> {
        self.query_bool("wallRight")
    }

    fn wall_left(&mut self) -> Result<bool> {
        self.query_bool("wallLeft")
    }

    fn turn_left(&mut self) -> Result<()> {
        self.query_ack("turnLeft")
    }

    fn turn_right(&mut self) -> Result<()> {
        self.query_ack("turnRight")
    }

    fn move_forward(&mut self) -> Result<bool> {
        match self.query("moveForward")?.as_str() {
            "ack" => Ok(true),
            "crash" => Ok(false),
            other => Err(MushakError::Protocol(format!(
                "expected ack/crash for 'moveForward', got '{}'",
                other
            ))),
        }
    }

    fn was_reset(&mut self) -> Result<bool> {
        self.query_bool("wasReset")
    }

    fn ack_reset(&mut self) -> Result<()> {
        self.query_ack("ackReset")
    }

    fn set_text(&mut self, cell: CellCoord, text: &str) -> Result<()> {
        self.command(&format!("setText {} {} {}", cell.x, cell.y, text))
    }

    fn set_color(&mut self, cell: CellCoord, color: char) -> Result<()> {
        self.command(&format!("setColor {} {} {}", cell.x, cell.y, color))
    }

    fn clear_all_color(&mut self) -> Result<()> {
        self.command("clearAllColor")
    }

    fn set_wall(&mut self, cell: CellCoord, dir: Direction) -> Result<()> {
        self.command(&format!(
            "setWall {} {} {}",
            cell.x,
            cell.y,
            Self::direction_char(dir)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn client_with_replies(replies: &str) -> MmsClient<Cursor<Vec<u8>>, Vec<u8>> {
        MmsClient::new(Cursor::new(replies.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_wall_query_parses_booleans() {
        let mut client = client_with_replies("true\nfalse\n");
        assert!(client.wall_front().unwrap());
        assert!(!client.wall_right().unwrap());
    }

    #[test]
    fn test_move_forward_crash_is_blocked_not_error() {
        let mut client = client_with_replies("crash\nack\n");
        assert!(!client.move_forward().unwrap());
        assert!(client.move_forward().unwrap());
    }

    #[test]
    fn test_unexpected_reply_is_protocol_error() {
        let mut client = client_with_replies("maybe\n");
        assert!(matches!(
            client.wall_front(),
            Err(MushakError::Protocol(_))
        ));
    }

    #[test]
    fn test_closed_stream_is_protocol_error() {
        let mut client = client_with_replies("");
        assert!(matches!(
            client.was_reset(),
            Err(MushakError::Protocol(_))
        ));
    }

    #[test]
    fn test_command_formatting() {
        let mut client = client_with_replies("16\nack\n");
        assert_eq!(client.maze_width().unwrap(), 16);
        client.turn_right().unwrap();
        client.set_color(CellCoord::new(3, 4), 'G').unwrap();
        client
            .set_wall(CellCoord::new(0, 0), Direction::West)
            .unwrap();
        client.set_text(CellCoord::new(1, 2), "14").unwrap();

        let sent = String::from_utf8(client.writer).unwrap();
        assert_eq!(
            sent,
            "mazeWidth\nturnRight\nsetColor 3 4 G\nsetWall 0 0 w\nsetText 1 2 14\n"
        );
    }
}
