use serde::Serialize;
use std::path::{Path, PathBuf};

pub const TITLE: &str = "Data Driven StartUp Lumine's: Budget Bites";

pub const INTRO: &str = "We are a group of culinary wizards (a.k.a. students) on a mission to cook up a \
revolutionary recipe app and generator, spiced with a pinch of machine learning magic. Our app will \
serve up recipes based on grocery discounts, helping you whip up delicious dishes while saving dough \
(both kinds!). 🍞💰";

pub const PITCH: &[&str] = &[
    "Imagine reducing food waste, slashing grocery expenses, and creating mouth-watering meals from \
discounted items. Our interactive platform will let you buy budget-friendly ingredients from multiple \
stores and turn them into scrumptious recipes. 🛒➡️🍲",
    "With food prices on the rise, more folks are feeling the pinch. They crave recipes that are easy on \
the wallet but packed with nutrition. Our app will be your trusty sous-chef, providing a feast of \
recipes based on the best grocery deals in town. 🌍",
    "You'll be able to tailor your culinary adventures by setting preferences like diet, nutrition, \
allergies, and cooking skills. Whether you're a kitchen novice or a seasoned pro, our app will deliver \
recipes that hit the sweet spot in flavor and price. 🥦🍗",
    "We'll suggest discounted goodies from various stores using our machine learning know-how. While \
other apps only show their own deals, we mix and match products from all over to bring you the best \
savings and recipe ideas. 🍎🛒👩‍🍳",
    "Our mission is to provide a smorgasbord of quality recipes while helping you make the most of \
grocery store discounts in the Netherlands, making cooking affordable, fun, and sustainable for \
everyone. 🍽️🌟",
];

pub const APPLICATION: &[&str] = &[
    "Chefs can customize their home page and switch locations to find local discounts. Folders are \
organized and categorized for specific recipe searches, and advanced filters include price per serving \
and budget-friendly options.",
    "Push notifications serve up recipes based on ingredients about to expire, and text-to-speech \
provides hands-free cooking instructions, alongside meal planning, bookmarks, and an activity feed.",
    "Future upgrades will include gesture-based instructions, voice commands and AI-generated \
instructional videos to guide novice chefs through recipes.",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VideoStatus {
    Available { path: PathBuf, bytes: u64 },
    Missing { expected: PathBuf },
}

/// Looks for the start-up video once; it is optional.
pub fn video_status(path: &Path) -> VideoStatus {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => VideoStatus::Available {
            path: path.to_path_buf(),
            bytes: meta.len(),
        },
        _ => {
            let expected = std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf());
            log::info!("Start-up video not found at {}", expected.display());
            VideoStatus::Missing { expected }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutPage {
    pub title: &'static str,
    pub intro: &'static str,
    pub pitch: &'static [&'static str],
    pub application: &'static [&'static str],
    pub video: VideoStatus,
}

pub fn page(video_path: &Path) -> AboutPage {
    AboutPage {
        title: TITLE,
        intro: INTRO,
        pitch: PITCH,
        application: APPLICATION,
        video: video_status(video_path),
    }
}
