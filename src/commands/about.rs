use colored::Colorize;
use std::path::Path;

use crate::about::{self, VideoStatus};

pub fn handle_command(video_path: &Path) {
    let page = about::page(video_path);

    println!("\n🍩 {}", page.title.bright_yellow().bold());
    println!("{}\n", page.intro);

    match &page.video {
        VideoStatus::Available { path, bytes } => {
            println!("🎬 Start-up video: {} ({} bytes)", path.display().to_string().cyan(), bytes);
        }
        VideoStatus::Missing { expected } => {
            println!(
                "{}",
                "Sorry, the startup video is currently unavailable. Please check back later.".yellow()
            );
            println!("Expected video file at: {}", expected.display());
        }
    }

    println!("\n{}", "Let us tell you about our sizzling start-up idea: Budget Bites! 🍳".bold());
    for paragraph in page.pitch {
        println!("\n{}", paragraph);
    }

    super::print_rule();
    println!("{}", "Data Driven StartUp Application".bold());
    for paragraph in page.application {
        println!("\n{}", paragraph);
    }
    println!();
}
