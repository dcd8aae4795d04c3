//! Character-grid frame and sprite drawing

use crate::sim::{Game, Side};

/// A fixed-size character grid, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<u8>,
}

impl Frame {
    /// New frame filled with spaces
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![b' '; width * height],
        }
    }

    pub fn clear(&mut self, ch: u8) {
        self.cells.fill(ch);
    }

    /// Write one cell; out-of-bounds writes are dropped
    pub fn set(&mut self, x: i32, y: i32, ch: u8) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = ch;
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|i| self.cells[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// One row of cells
    pub fn row(&self, y: usize) -> &[u8] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Underscores along the bottom row
    pub fn draw_ground(&mut self) {
        let y = self.height as i32 - 1;
        for x in 0..self.width as i32 {
            self.set(x, y, b'_');
        }
    }

    /// Vertical post in column `x`, rows `top..=bottom` (clipped)
    pub fn draw_net(&mut self, x: i32, top: i32, bottom: i32) {
        for y in top.max(0)..=bottom {
            self.set(x, y, b'|');
        }
    }

    /// 3x2 blob, centered on `x`, bottom row at `y`
    pub fn draw_blob(&mut self, x: i32, y: i32) {
        for dy in [-1, 0] {
            for dx in -1..=1 {
                self.set(x + dx, y + dy, b'O');
            }
        }
    }

    pub fn draw_ball(&mut self, x: i32, y: i32) {
        self.set(x, y, b'*');
    }

    /// Write text left to right, clipped at the right edge
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        for (i, b) in text.bytes().enumerate() {
            self.set(x + i as i32, y, b);
        }
    }
}

/// Build the frame for the current game state
pub fn compose(game: &Game) -> Frame {
    let court = game.court();
    let mut frame = Frame::new(court.width as usize, court.height as usize);
    frame.draw_ground();
    frame.draw_net(court.net_x, court.net_top_y, court.net_bottom_y);

    for side in [Side::Left, Side::Right] {
        let pos = game.player(side).pos;
        frame.draw_blob(pos.x.round() as i32, pos.y.round() as i32);
    }
    let ball = game.ball().pos;
    frame.draw_ball(ball.x.round() as i32, ball.y.round() as i32);

    let (p1, p2) = game.score();
    let mut hud = format!("P1 {p1} : {p2} P2");
    if game.is_waiting_serve() {
        let controls = game.controls();
        hud.push_str(&format!(
            "  ({} = serve left, {} = serve right)",
            controls.serve_left as char, controls.serve_right as char
        ));
    }
    frame.draw_text(0, 0, &hud);

    frame
}
