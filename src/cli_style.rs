use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Stylize};
use unicode_width::UnicodeWidthStr;

use crate::client::Theme;
use crate::render::{LOGIN_TO_COMMENT, NO_POEMS_PLACEHOLDER};

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    clap::builder::Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .literal(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Color Palettes - Dark (Neon) and Light (Paper)
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    pub const CYAN: Color = Color::Rgb {
        r: 0,
        g: 255,
        b: 255,
    };
    pub const PURPLE: Color = Color::Rgb {
        r: 180,
        g: 100,
        b: 255,
    };
    pub const PINK: Color = Color::Rgb {
        r: 255,
        g: 105,
        b: 180,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 0,
        g: 255,
        b: 136,
    };
    pub const ORANGE: Color = Color::Rgb {
        r: 255,
        g: 165,
        b: 0,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
    };
    #[allow(dead_code)]
    pub const BLUE: Color = Color::Rgb {
        r: 100,
        g: 149,
        b: 237,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    // Light theme, for terminals with a bright background
    pub const INK: Color = Color::Rgb { r: 40, g: 40, b: 50 };
    pub const SLATE: Color = Color::Rgb {
        r: 120,
        g: 120,
        b: 135,
    };
    pub const TEAL: Color = Color::Rgb {
        r: 0,
        g: 150,
        b: 136,
    };
    pub const INDIGO: Color = Color::Rgb {
        r: 92,
        g: 60,
        b: 190,
    };
}

pub struct Palette {
    pub accent: crossterm::style::Color,
    pub accent_alt: crossterm::style::Color,
    pub title: crossterm::style::Color,
    pub text: crossterm::style::Color,
    pub dim: crossterm::style::Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            accent: colors::CYAN,
            accent_alt: colors::PURPLE,
            title: colors::PINK,
            text: colors::WHITE,
            dim: colors::DIM,
        },
        Theme::Light => Palette {
            accent: colors::TEAL,
            accent_alt: colors::INDIGO,
            title: colors::INDIGO,
            text: colors::INK,
            dim: colors::SLATE,
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Box Drawing Characters
// ═══════════════════════════════════════════════════════════════════════════════

pub mod box_chars {
    pub const DOUBLE_TOP_LEFT: &str = "╔";
    pub const DOUBLE_TOP_RIGHT: &str = "╗";
    pub const DOUBLE_BOTTOM_LEFT: &str = "╚";
    pub const DOUBLE_BOTTOM_RIGHT: &str = "╝";
    pub const DOUBLE_HORIZONTAL: &str = "═";
    pub const DOUBLE_VERTICAL: &str = "║";

    pub const BULLET: &str = "●";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Banner
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_banner(palette: &Palette) {
    let banner = r#"
    ██╗   ██╗███████╗██████╗ ███████╗███████╗██████╗  ██████╗  █████╗ ██████╗ ██████╗
    ██║   ██║██╔════╝██╔══██╗██╔════╝██╔════╝██╔══██╗██╔═══██╗██╔══██╗██╔══██╗██╔══██╗
    ██║   ██║█████╗  ██████╔╝███████╗█████╗  ██████╔╝██║   ██║███████║██████╔╝██║  ██║
    ╚██╗ ██╔╝██╔══╝  ██╔══██╗╚════██║██╔══╝  ██╔══██╗██║   ██║██╔══██║██╔══██╗██║  ██║
     ╚████╔╝ ███████╗██║  ██║███████║███████╗██████╔╝╚██████╔╝██║  ██║██║  ██║██████╔╝
      ╚═══╝  ╚══════╝╚═╝  ╚═╝╚══════╝╚══════╝╚═════╝  ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝╚═════╝
"#;

    // Print with gradient effect
    let lines: Vec<&str> = banner.lines().collect();
    let gradient_colors = [
        palette.accent,
        palette.accent,
        palette.accent,
        palette.accent_alt,
        palette.accent_alt,
        palette.title,
        palette.title,
    ];

    for (i, line) in lines.iter().enumerate() {
        let color = gradient_colors.get(i).unwrap_or(&palette.accent);
        println!("{}", line.with(*color).bold());
    }

    let subtitle = "  ═══════════════════════  POETRY BOARD CLI  ═══════════════════════";
    println!("{}", subtitle.with(palette.dim));
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        box_chars::CHECK.to_string().with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    println!(
        " {} {}",
        box_chars::CROSS_MARK.to_string().with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

pub fn print_warning(message: &str) {
    println!(
        " {} {}",
        "⚠".with(colors::ORANGE).bold(),
        message.with(colors::ORANGE)
    );
}

#[allow(dead_code)]
pub fn print_info(message: &str) {
    println!(
        " {} {}",
        "ℹ".with(colors::BLUE).bold(),
        message.with(colors::BLUE)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Key-Value Display
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_key_value(key: &str, value: &str, palette: &Palette) {
    println!(
        "  {} {} {}",
        box_chars::BULLET.with(palette.accent_alt),
        format!("{}:", key).with(palette.dim),
        value.with(palette.text)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Board Display
// ═══════════════════════════════════════════════════════════════════════════════

/// Prints the rendered board, coloring it by line shape: titles start at
/// column zero with their display number, everything else is indented.
pub fn print_board(board: &str, palette: &Palette) {
    for line in board.lines() {
        let trimmed = line.trim_start();
        if line.starts_with(|c: char| c.is_ascii_digit()) {
            println!("{}", line.with(palette.title).bold());
        } else if trimmed.starts_with("by ") {
            println!("{}", line.with(palette.accent_alt));
        } else if trimmed == NO_POEMS_PLACEHOLDER
            || trimmed.starts_with("reply with:")
            || trimmed.starts_with(LOGIN_TO_COMMENT)
            || trimmed.starts_with("(no comments yet)")
        {
            println!(
                "{}",
                line.with(palette.dim).attribute(Attribute::Italic)
            );
        } else {
            println!("{}", line.with(palette.text));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Prompt Styling
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_prompt(palette: &Palette) -> String {
    format!(
        "{}{}{} ",
        "❯".with(palette.accent).bold(),
        "❯".with(palette.accent_alt).bold(),
        "❯".with(palette.title).bold(),
    )
}

pub fn print_command_echo(command: &str, palette: &Palette) {
    println!(
        "{}{}{}  {}",
        "❯".with(palette.accent).bold(),
        "❯".with(palette.accent_alt).bold(),
        "❯".with(palette.title).bold(),
        command.with(colors::GREEN).bold()
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Welcome Message
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_welcome(server_url: &str, profile_path: &str, palette: &Palette) {
    print_banner(palette);

    let box_width = 68;

    // Top border
    print!("  {}", box_chars::DOUBLE_TOP_LEFT.with(palette.accent_alt));
    print!(
        "{}",
        box_chars::DOUBLE_HORIZONTAL
            .repeat(box_width)
            .with(palette.accent_alt)
    );
    println!("{}", box_chars::DOUBLE_TOP_RIGHT.with(palette.accent_alt));

    let greeting = "The poetry board, in your terminal";
    print!("  {}", box_chars::DOUBLE_VERTICAL.with(palette.accent_alt));
    print!("  {}  ", greeting.with(colors::GREEN));
    let padding = box_width - 2 - greeting.width() - 2;
    print!("{}", " ".repeat(padding));
    println!("{}", box_chars::DOUBLE_VERTICAL.with(palette.accent_alt));

    print!("  {}", box_chars::DOUBLE_VERTICAL.with(palette.accent_alt));
    print!("{}", " ".repeat(box_width));
    println!("{}", box_chars::DOUBLE_VERTICAL.with(palette.accent_alt));

    let lines = [
        ("Server", server_url),
        ("Profile", profile_path),
        ("Version", env!("CARGO_PKG_VERSION")),
    ];

    for (key, value) in lines {
        print!("  {}", box_chars::DOUBLE_VERTICAL.with(palette.accent_alt));
        let content = format!("  {} {}", format!("{}:", key).with(palette.dim), value);
        let visible_len = key.len() + 2 + value.len() + 2;
        print!("{}", content);
        print!("{}", " ".repeat(box_width.saturating_sub(visible_len)));
        println!("{}", box_chars::DOUBLE_VERTICAL.with(palette.accent_alt));
    }

    print!("  {}", box_chars::DOUBLE_VERTICAL.with(palette.accent_alt));
    print!("{}", " ".repeat(box_width));
    println!("{}", box_chars::DOUBLE_VERTICAL.with(palette.accent_alt));

    print!("  {}", box_chars::DOUBLE_VERTICAL.with(palette.accent_alt));
    let help_msg = "  Type 'help' for available commands";
    print!("{}", help_msg.with(palette.dim));
    print!("{}", " ".repeat(box_width - help_msg.len()));
    println!("{}", box_chars::DOUBLE_VERTICAL.with(palette.accent_alt));

    // Bottom border
    print!(
        "  {}",
        box_chars::DOUBLE_BOTTOM_LEFT.with(palette.accent_alt)
    );
    print!(
        "{}",
        box_chars::DOUBLE_HORIZONTAL
            .repeat(box_width)
            .with(palette.accent_alt)
    );
    println!(
        "{}",
        box_chars::DOUBLE_BOTTOM_RIGHT.with(palette.accent_alt)
    );
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Goodbye Message
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_goodbye() {
    println!();
    println!(
        "  {} {}",
        "👋".with(colors::CYAN),
        "Goodbye! Thanks for using Verseboard"
            .with(colors::PURPLE)
            .bold()
    );
    println!();
}
