//! # Terminal Renderer
//!
//! Paints a [`ScreenModel`] onto a [`RenderStream`]. The whole screen is
//! redrawn on every change; the widget is small enough that selective
//! redraws would buy nothing.

use crate::repl::io::RenderStream;
use crate::repl::views::display_surface::Focus;
use crate::repl::views::screen_model::{LineStyle, ScreenModel};
use anyhow::Result;
use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

pub const FOOTER: &str = "Enter/F5 buscar · Ctrl+L limpar cache · Esc sair";

// Helper macro to convert crossterm errors to anyhow errors
macro_rules! queue_term {
    ($($arg:expr),* $(,)?) => {
        queue!($($arg),*).map_err(anyhow::Error::from)
    };
}

/// Trait for rendering views
pub trait ViewRenderer {
    /// Prepare the terminal for drawing
    fn initialize(&mut self) -> Result<()>;

    /// Redraw the whole screen
    fn render_full(&mut self, screen: &ScreenModel) -> Result<()>;

    /// Restore the terminal on exit
    fn cleanup(&mut self) -> Result<()>;
}

pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: (u16, u16),
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
        })
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn render_stream(&self) -> &RS {
        &self.render_stream
    }

    fn draw_line(&mut self, row: u16, text: &str, style: LineStyle) -> Result<()> {
        let width = self.terminal_size.0 as usize;
        let visible: String = text.chars().take(width).collect();

        self.render_stream.move_cursor(0, row)?;
        match style {
            LineStyle::Title => {
                queue_term!(self.render_stream, SetAttribute(Attribute::Bold))?;
            }
            LineStyle::Muted => {
                queue_term!(self.render_stream, SetForegroundColor(Color::DarkGrey))?;
            }
            LineStyle::Error => {
                queue_term!(self.render_stream, SetForegroundColor(Color::Red))?;
            }
            LineStyle::Success => {
                queue_term!(
                    self.render_stream,
                    SetForegroundColor(Color::Green),
                    SetAttribute(Attribute::Bold)
                )?;
            }
            LineStyle::Primary => {
                queue_term!(
                    self.render_stream,
                    SetForegroundColor(Color::Blue),
                    SetAttribute(Attribute::Bold)
                )?;
            }
            LineStyle::Progress => {
                queue_term!(self.render_stream, SetForegroundColor(Color::Cyan))?;
            }
            LineStyle::Plain => {}
        }
        queue_term!(
            self.render_stream,
            Print(visible),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Clear(ClearType::UntilNewLine)
        )?;
        Ok(())
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.enable_bracketed_paste()?;
        self.render_stream.hide_cursor()?;
        Ok(())
    }

    fn render_full(&mut self, screen: &ScreenModel) -> Result<()> {
        let (_, height) = self.terminal_size;

        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;

        // Keep the last row for the footer
        let body_rows = height.saturating_sub(1);
        for (row, line) in screen.lines().iter().enumerate() {
            let row = row as u16;
            if row >= body_rows {
                break;
            }
            self.draw_line(row, &line.text, line.style)?;
        }
        if height > 0 {
            self.draw_line(height - 1, FOOTER, LineStyle::Muted)?;
        }

        let (column, row) = screen.input_cursor();
        self.render_stream.move_cursor(column, row)?;
        self.render_stream.flush()?;

        if screen.focus_target() == Focus::Input && screen.layout().search_enabled {
            self.render_stream.show_cursor()?;
        }
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.show_cursor()?;
        self.render_stream.disable_bracketed_paste()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        Ok(())
    }
}
