use crate::{save_png, Scaler, ScalerOpts};
use anyhow::Result;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

/// Source filenames expected in the project root.
pub const LOGO: &str = "logo.png";
pub const NOTIF: &str = "notif.png";
pub const WELCOME_PRIMARY: &str = "wc1.png";
pub const WELCOME_SECONDARY: &str = "wc2.png";

/// Launcher icon size in px per density (48dp at 1x).
pub const LAUNCHER_SIZES: [(Density, u32); 5] = [
    (Density::Mdpi, 48),
    (Density::Hdpi, 72),
    (Density::Xhdpi, 96),
    (Density::Xxhdpi, 144),
    (Density::Xxxhdpi, 192),
];

/// Notification icon size in px per density (24dp at 1x).
pub const NOTIFICATION_SIZES: [(Density, u32); 5] = [
    (Density::Mdpi, 24),
    (Density::Hdpi, 36),
    (Density::Xhdpi, 48),
    (Density::Xxhdpi, 72),
    (Density::Xxxhdpi, 96),
];

/// Landscape welcome screen, full hd.
pub const WELCOME_TARGET: (u32, u32) = (1920, 1080);
/// Portrait splash screen, 9:16.
pub const SPLASH_TARGET: (u32, u32) = (1080, 1920);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Density {
    Mdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
}

impl Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mdpi => "mdpi",
            Self::Hdpi => "hdpi",
            Self::Xhdpi => "xhdpi",
            Self::Xxhdpi => "xxhdpi",
            Self::Xxxhdpi => "xxxhdpi",
        };
        write!(f, "{name}")
    }
}

pub fn res_dir(root: &Path) -> PathBuf {
    root.join("app").join("src").join("main").join("res")
}

/// Resizes the logo into `mipmap-{density}/ic_launcher.png` and
/// `ic_launcher_round.png`. Returns the number of files written.
pub fn process_launcher(root: &Path) -> Result<u32> {
    let scaler = Scaler::open(root.join(LOGO))?;
    let (width, height) = scaler.dimensions();
    tracing::debug!("logo source is {width}x{height} px");
    let res = res_dir(root);
    let mut count = 0;
    for (density, size) in LAUNCHER_SIZES {
        let icon = scaler.normalize(ScalerOpts::stretch(size, size));
        let dir = res.join(format!("mipmap-{density}"));
        save_png(&icon, dir.join("ic_launcher.png"))?;
        save_png(&icon, dir.join("ic_launcher_round.png"))?;
        tracing::debug!("launcher {density}: {size}x{size} px");
        count += 2;
    }
    Ok(count)
}

/// Resizes the notification icon into `drawable-{density}/ic_stat_notify.png`.
pub fn process_notification(root: &Path) -> Result<u32> {
    let scaler = Scaler::open(root.join(NOTIF))?;
    let res = res_dir(root);
    let mut count = 0;
    for (density, size) in NOTIFICATION_SIZES {
        let dir = res.join(format!("drawable-{density}"));
        scaler.write(dir.join("ic_stat_notify.png"), ScalerOpts::stretch(size, size))?;
        tracing::debug!("notification {density}: {size}x{size} px");
        count += 1;
    }
    Ok(count)
}

/// Normalizes the welcome and splash screens into `drawable-nodpi`.
pub fn process_welcome(root: &Path) -> Result<u32> {
    // Both sources are checked up front so a missing one fails the whole
    // category before anything is written.
    let primary = Scaler::open(root.join(WELCOME_PRIMARY))?;
    let secondary = Scaler::open(root.join(WELCOME_SECONDARY))?;
    let nodpi = res_dir(root).join("drawable-nodpi");
    let (width, height) = WELCOME_TARGET;
    primary.write(nodpi.join("welcome_primary.png"), ScalerOpts::cover(width, height))?;
    let (width, height) = SPLASH_TARGET;
    let splash = secondary.normalize(ScalerOpts::cover(width, height));
    save_png(&splash, nodpi.join("splash.png"))?;
    save_png(&splash, nodpi.join("welcome_secondary.png"))?;
    Ok(3)
}

/// Points the splash style at the generated drawable. Returns true if the
/// styles file was rewritten, false if it is absent or already up to date.
pub fn update_styles(root: &Path) -> Result<bool> {
    let path = res_dir(root).join("values").join("styles.xml");
    if !path.exists() {
        return Ok(false);
    }
    let content = std::fs::read_to_string(&path)?;
    if !content.contains("@drawable/ic_splash") {
        return Ok(false);
    }
    std::fs::write(&path, content.replace("@drawable/ic_splash", "@drawable/splash"))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MissingSource;
    use image::{Rgba, RgbaImage};

    fn write_source(dir: &Path, name: &str, width: u32, height: u32) {
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
            .save(dir.join(name))
            .unwrap();
    }

    #[test]
    fn launcher_writes_two_icons_per_density() {
        let dir = tempfile::tempdir().unwrap();
        write_source(dir.path(), LOGO, 1024, 1024);
        assert_eq!(process_launcher(dir.path()).unwrap(), 10);
        let res = res_dir(dir.path());
        for (density, size) in LAUNCHER_SIZES {
            for name in ["ic_launcher.png", "ic_launcher_round.png"] {
                let icon = image::open(res.join(format!("mipmap-{density}")).join(name)).unwrap();
                assert_eq!(icon.width(), size);
                assert_eq!(icon.height(), size);
            }
        }
    }

    #[test]
    fn notification_writes_one_icon_per_density() {
        let dir = tempfile::tempdir().unwrap();
        write_source(dir.path(), NOTIF, 512, 512);
        assert_eq!(process_notification(dir.path()).unwrap(), 5);
        let res = res_dir(dir.path());
        for (density, size) in NOTIFICATION_SIZES {
            let icon = image::open(
                res.join(format!("drawable-{density}"))
                    .join("ic_stat_notify.png"),
            )
            .unwrap();
            assert_eq!((icon.width(), icon.height()), (size, size));
        }
    }

    #[test]
    fn welcome_writes_three_screens() {
        let dir = tempfile::tempdir().unwrap();
        write_source(dir.path(), WELCOME_PRIMARY, 2560, 1440);
        write_source(dir.path(), WELCOME_SECONDARY, 2000, 1000);
        assert_eq!(process_welcome(dir.path()).unwrap(), 3);
        let nodpi = res_dir(dir.path()).join("drawable-nodpi");
        let primary = image::open(nodpi.join("welcome_primary.png")).unwrap();
        assert_eq!((primary.width(), primary.height()), WELCOME_TARGET);
        for name in ["splash.png", "welcome_secondary.png"] {
            let screen = image::open(nodpi.join(name)).unwrap();
            assert_eq!((screen.width(), screen.height()), SPLASH_TARGET);
        }
    }

    #[test]
    fn missing_source_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let err = process_notification(dir.path()).unwrap_err();
        assert!(err.downcast_ref::<MissingSource>().is_some());
        assert!(!res_dir(dir.path()).exists());
    }

    #[test]
    fn missing_secondary_fails_welcome_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        write_source(dir.path(), WELCOME_PRIMARY, 1920, 1080);
        let err = process_welcome(dir.path()).unwrap_err();
        assert!(err.downcast_ref::<MissingSource>().is_some());
        assert!(!res_dir(dir.path()).exists());
    }

    #[test]
    fn styles_rewrite_swaps_reference() {
        let dir = tempfile::tempdir().unwrap();
        let values = res_dir(dir.path()).join("values");
        std::fs::create_dir_all(&values).unwrap();
        let styles = values.join("styles.xml");
        std::fs::write(
            &styles,
            "<item name=\"android:windowBackground\">@drawable/ic_splash</item>",
        )
        .unwrap();
        assert!(update_styles(dir.path()).unwrap());
        let content = std::fs::read_to_string(&styles).unwrap();
        assert!(content.contains("@drawable/splash"));
        assert!(!content.contains("@drawable/ic_splash"));
        // Second run finds nothing left to substitute.
        assert!(!update_styles(dir.path()).unwrap());
    }

    #[test]
    fn styles_rewrite_without_styles_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!update_styles(dir.path()).unwrap());
    }
}
