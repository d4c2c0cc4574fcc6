//! Terminal rendering of studio state.

use colored::{Color, ColoredString, Colorize};
use tape_application::{Notice, NoticeLevel};
use tape_core::auth::SessionUser;
use tape_core::chat::{Chat, ChatListSnapshot, MessageRole};
use tape_core::generation::Classification;
use tape_core::scene::{Geometry, SceneSession};
use tape_core::state::Theme;

/// Theme-dependent colors.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    accent: Color,
    text: Color,
    muted: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                accent: Color::BrightCyan,
                text: Color::BrightWhite,
                muted: Color::BrightBlack,
            },
            Theme::Light => Self {
                accent: Color::Blue,
                text: Color::Black,
                muted: Color::BrightBlack,
            },
        }
    }

    pub fn accent(&self, text: &str) -> ColoredString {
        text.color(self.accent)
    }

    pub fn text(&self, text: &str) -> ColoredString {
        text.color(self.text)
    }

    pub fn muted(&self, text: &str) -> ColoredString {
        text.color(self.muted)
    }
}

pub fn notice(notice: &Notice) {
    let text = notice.text.as_str();
    match notice.level {
        NoticeLevel::Info => println!("{}", text.bright_blue()),
        NoticeLevel::Success => println!("{}", text.bright_green()),
        NoticeLevel::Warning => println!("{}", text.yellow()),
        NoticeLevel::Error => eprintln!("{}", text.red()),
    }
}

/// Sidebar: numbered chats with the current one marked.
pub fn chat_list(palette: &Palette, snapshot: &ChatListSnapshot) {
    println!("{}", palette.accent("Chats").bold());
    for (index, chat) in snapshot.chats.iter().enumerate() {
        let marker = if chat.id == snapshot.current_id {
            "*"
        } else {
            " "
        };
        println!(
            "{} {} {} {}",
            palette.accent(marker),
            palette.muted(&format!("{:>2}.", index + 1)),
            palette.text(&chat.name),
            palette.muted(&format!("({} messages)", chat.message_count)),
        );
    }
}

pub fn history(palette: &Palette, chat: &Chat) {
    println!("{}", palette.accent(&chat.name).bold());
    if chat.messages.is_empty() {
        println!("{}", palette.muted("No messages yet."));
    }
    for message in &chat.messages {
        let role = match message.role {
            MessageRole::User => "you",
            MessageRole::Assistant => "ai",
            MessageRole::System => "system",
        };
        println!(
            "{} {}",
            palette.muted(&format!("[{}]", role)),
            palette.text(&message.content)
        );
        if let Some(object) = &message.object {
            println!(
                "    {} {}",
                "->".green(),
                palette.muted(&format!("{} {}", object.material.color, object.geometry.shape))
            );
        }
        if let Some(error) = &message.error {
            println!("    {} {}", "!!".red(), error.red());
        }
    }
}

pub fn scene(palette: &Palette, scene: &SceneSession) {
    let settings = scene.settings();
    println!(
        "{} {}",
        palette.accent("Scene").bold(),
        palette.muted(&format!(
            "(post-processing: {}, physics: {})",
            on_off(settings.post_processing),
            on_off(settings.physics)
        ))
    );
    if scene.children().is_empty() {
        println!("{}", palette.muted("  (empty)"));
    }
    for node in scene.children() {
        let t = &node.transform;
        println!(
            "  {} {} {}",
            palette.text(&describe_geometry(&node.geometry)),
            palette.accent(&node.material.color.to_string()),
            palette.muted(&format!(
                "rot=({:.2}, {:.2}, {:.2}) y={:.2} scale={:.2}",
                t.rotation[0], t.rotation[1], t.rotation[2], t.position[1], t.scale[0]
            ))
        );
    }
}

pub fn classification(palette: &Palette, classification: &Classification) {
    let rows = [
        ("shape", classification.shape.to_string()),
        (
            "color",
            match &classification.color_name {
                Some(name) => format!("{} ({})", name, classification.color),
                None => format!("{} (shape default)", classification.color),
            },
        ),
        ("material", classification.material.to_string()),
        (
            "animation",
            match classification.animation_modifier {
                Some(modifier) => modifier.to_string(),
                None => format!("{} default", classification.shape),
            },
        ),
        ("size", format!("x{}", classification.size_multiplier)),
    ];
    for (label, value) in rows {
        println!("{:>9} {}", palette.muted(label), palette.text(&value));
    }
}

pub fn user(palette: &Palette, user: Option<&SessionUser>) {
    match user {
        Some(user) => {
            println!(
                "{} {}",
                palette.text(&user.name).bold(),
                palette.muted(&format!("<{}>", user.email))
            );
            println!("{}", palette.muted(&user.avatar_url));
        }
        None => println!("{}", palette.muted("Guest (not signed in)")),
    }
}

fn describe_geometry(geometry: &Geometry) -> String {
    match geometry {
        Geometry::Sphere { radius, .. } => format!("sphere r={}", radius),
        Geometry::Box {
            width,
            height,
            depth,
        } => format!("box {}x{}x{}", width, height, depth),
        Geometry::Cylinder { radius_top, height, .. } => {
            format!("cylinder r={} h={}", radius_top, height)
        }
        Geometry::Cone { radius, height, .. } => format!("cone r={} h={}", radius, height),
        Geometry::Torus { radius, tube, .. } => format!("torus r={} tube={}", radius, tube),
        Geometry::Plane { width, height } => format!("plane {}x{}", width, height),
        Geometry::Ring {
            inner_radius,
            outer_radius,
            ..
        } => format!("ring {}-{}", inner_radius, outer_radius),
        Geometry::Polyhedron { shape, radius } => format!("{} r={}", shape, radius),
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
