//! Persistence of user defaults and named transfer jobs.
//!
//! Defaults live in a single JSON settings file; jobs are JSON files named
//! after the job inside a jobs directory. A missing file is never an error
//! (the caller falls back to hardcoded defaults), while unreadable JSON is,
//! so a corrupted file cannot be silently replaced.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use worldshift_core::DelayProfile;

/// Persisted defaults applied when a command-line value is absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// World the structure is copied from.
    pub(crate) source_world: Option<String>,
    /// World the structure is pasted into.
    pub(crate) target_world: Option<String>,
    /// Destination origin as `[x, y, z]`.
    pub(crate) target_origin: Option<[i64; 3]>,
    /// Maximum tile footprint along X and Z.
    pub(crate) tile_size: Option<i64>,
    /// Whether creative-mode switches are emitted.
    pub(crate) creative_mode: Option<bool>,
    /// Whether paste operations are replaced by announcements.
    pub(crate) dry_run: Option<bool>,
    /// File the plain script is written to.
    pub(crate) output_file: Option<PathBuf>,
    /// Macro-tool configuration document to splice the profile into.
    pub(crate) macro_config: Option<PathBuf>,
    /// Per-category tick delays.
    pub(crate) delays: Option<DelayProfile>,
}

impl Settings {
    /// Loads settings from `path`, returning defaults when the file does not
    /// exist.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("parsing settings file '{}'", path.display())),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => {
                Err(error).with_context(|| format!("reading settings file '{}'", path.display()))
            }
        }
    }

    /// Writes the settings to `path` as pretty-printed JSON.
    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing settings")?;
        fs::write(path, json + "\n")
            .with_context(|| format!("writing settings file '{}'", path.display()))
    }
}

/// A saved transfer job: the persisted defaults plus its source boxes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct JobFile {
    /// Every settings-level value the job pins down.
    #[serde(flatten)]
    pub(crate) settings: Settings,
    /// Source boxes as `[x1, y1, z1, x2, y2, z2]` corner lists.
    #[serde(default)]
    pub(crate) source_boxes: Vec<[i64; 6]>,
}

/// Values supplied on the command line, overriding every stored layer.
#[derive(Clone, Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) source_world: Option<String>,
    pub(crate) target_world: Option<String>,
    pub(crate) target_origin: Option<[i64; 3]>,
    pub(crate) tile_size: Option<i64>,
    pub(crate) creative_mode: Option<bool>,
    pub(crate) dry_run: Option<bool>,
    pub(crate) output_file: Option<PathBuf>,
    pub(crate) macro_config: Option<PathBuf>,
    pub(crate) move_delay: Option<u32>,
    pub(crate) teleport_delay: Option<u32>,
    pub(crate) copy_delay: Option<u32>,
    pub(crate) paste_delay: Option<u32>,
}

/// Fully resolved run inputs after layering.
///
/// World names stay optional; the caller decides whether their absence is an
/// error (a plain run) or acceptable (`--list-jobs`).
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Resolved {
    pub(crate) source_world: Option<String>,
    pub(crate) target_world: Option<String>,
    pub(crate) target_origin: [i64; 3],
    pub(crate) tile_size: i64,
    pub(crate) creative_mode: bool,
    pub(crate) dry_run: bool,
    pub(crate) output_file: Option<PathBuf>,
    pub(crate) macro_config: Option<PathBuf>,
    pub(crate) delays: DelayProfile,
}

pub(crate) const DEFAULT_TILE_SIZE: i64 = 64;

fn layered<T, F>(job: Option<&Settings>, defaults: &Settings, get: F) -> Option<T>
where
    F: Fn(&Settings) -> Option<T>,
{
    job.and_then(&get).or_else(|| get(defaults))
}

/// Resolves every run input through the override layers.
///
/// Precedence per value, most specific wins: command-line overrides, then
/// the loaded job, then the settings file, then the hardcoded defaults.
pub(crate) fn resolve(
    overrides: Overrides,
    job: Option<&Settings>,
    defaults: &Settings,
) -> Resolved {
    let base_delays = layered(job, defaults, |s| s.delays).unwrap_or_default();
    Resolved {
        source_world: overrides
            .source_world
            .or_else(|| layered(job, defaults, |s| s.source_world.clone())),
        target_world: overrides
            .target_world
            .or_else(|| layered(job, defaults, |s| s.target_world.clone())),
        target_origin: overrides
            .target_origin
            .or_else(|| layered(job, defaults, |s| s.target_origin))
            .unwrap_or([0, 0, 0]),
        tile_size: overrides
            .tile_size
            .or_else(|| layered(job, defaults, |s| s.tile_size))
            .unwrap_or(DEFAULT_TILE_SIZE),
        creative_mode: overrides
            .creative_mode
            .or_else(|| layered(job, defaults, |s| s.creative_mode))
            .unwrap_or(true),
        // Dry-run defaults to on so a fresh setup cannot paste by accident.
        dry_run: overrides
            .dry_run
            .or_else(|| layered(job, defaults, |s| s.dry_run))
            .unwrap_or(true),
        output_file: overrides
            .output_file
            .or_else(|| layered(job, defaults, |s| s.output_file.clone())),
        macro_config: overrides
            .macro_config
            .or_else(|| layered(job, defaults, |s| s.macro_config.clone())),
        delays: DelayProfile::new(
            overrides.move_delay.unwrap_or(base_delays.move_world()),
            overrides.teleport_delay.unwrap_or(base_delays.teleport()),
            overrides.copy_delay.unwrap_or(base_delays.copy()),
            overrides.paste_delay.unwrap_or(base_delays.paste()),
        ),
    }
}

fn job_path(jobs_dir: &Path, name: &str) -> PathBuf {
    jobs_dir.join(format!("{name}.json"))
}

/// Loads the named job from the jobs directory.
pub(crate) fn load_job(jobs_dir: &Path, name: &str) -> Result<JobFile> {
    let path = job_path(jobs_dir, name);
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("reading job file '{}'", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parsing job file '{}'", path.display()))
}

/// Saves the job under the provided name, creating the directory if needed.
pub(crate) fn save_job(jobs_dir: &Path, name: &str, job: &JobFile) -> Result<PathBuf> {
    fs::create_dir_all(jobs_dir)
        .with_context(|| format!("creating jobs directory '{}'", jobs_dir.display()))?;
    let path = job_path(jobs_dir, name);
    let json = serde_json::to_string_pretty(job).context("serializing job")?;
    fs::write(&path, json + "\n")
        .with_context(|| format!("writing job file '{}'", path.display()))?;
    Ok(path)
}

/// Lists the names of all saved jobs, sorted alphabetically.
///
/// A missing jobs directory simply yields an empty list.
pub(crate) fn list_jobs(jobs_dir: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(jobs_dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => {
            return Err(error)
                .with_context(|| format!("listing jobs directory '{}'", jobs_dir.display()))
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("listing jobs directory '{}'", jobs_dir.display()))?
            .path();
        if path.extension().is_some_and(|ext| ext == "json") {
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_owned());
            }
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::{resolve, JobFile, Overrides, Settings};
    use worldshift_core::DelayProfile;

    #[test]
    fn flags_beat_job_beats_settings_file() {
        let defaults = Settings {
            source_world: Some("from-settings".to_owned()),
            tile_size: Some(32),
            dry_run: Some(false),
            ..Settings::default()
        };
        let job = Settings {
            source_world: Some("from-job".to_owned()),
            tile_size: Some(48),
            ..Settings::default()
        };
        let overrides = Overrides {
            tile_size: Some(16),
            ..Overrides::default()
        };

        let resolved = resolve(overrides, Some(&job), &defaults);
        assert_eq!(resolved.tile_size, 16, "a flag beats both stored layers");
        assert_eq!(
            resolved.source_world.as_deref(),
            Some("from-job"),
            "the job beats the settings file",
        );
        assert!(!resolved.dry_run, "settings fill the gaps a job leaves");
    }

    #[test]
    fn hardcoded_defaults_keep_a_fresh_setup_safe() {
        let resolved = resolve(Overrides::default(), None, &Settings::default());
        assert!(resolved.dry_run, "dry-run starts on until explicitly disabled");
        assert!(resolved.creative_mode);
        assert_eq!(resolved.tile_size, 64);
        assert_eq!(resolved.target_origin, [0, 0, 0]);
        assert_eq!(resolved.delays, DelayProfile::new(20, 15, 50, 100));
        assert_eq!(resolved.source_world, None, "worlds have no fallback");
    }

    #[test]
    fn delay_flags_override_a_stored_profile_per_field() {
        let defaults = Settings {
            delays: Some(DelayProfile::new(1, 2, 3, 4)),
            ..Settings::default()
        };
        let overrides = Overrides {
            paste_delay: Some(250),
            ..Overrides::default()
        };

        let resolved = resolve(overrides, None, &defaults);
        assert_eq!(resolved.delays, DelayProfile::new(1, 2, 3, 250));
    }

    #[test]
    fn settings_tolerate_missing_fields() {
        let settings: Settings = serde_json::from_str("{}").expect("empty object parses");
        assert_eq!(settings, Settings::default());

        let partial: Settings =
            serde_json::from_str(r#"{"source_world": "overworld"}"#).expect("partial parses");
        assert_eq!(partial.source_world.as_deref(), Some("overworld"));
        assert_eq!(partial.tile_size, None);
    }

    #[test]
    fn job_file_round_trips_with_flattened_settings() {
        let job = JobFile {
            settings: Settings {
                source_world: Some("overworld".to_owned()),
                target_world: Some("build".to_owned()),
                target_origin: Some([0, 64, 0]),
                tile_size: Some(64),
                creative_mode: Some(true),
                dry_run: Some(false),
                output_file: None,
                macro_config: None,
                delays: Some(DelayProfile::new(20, 15, 50, 100)),
            },
            source_boxes: vec![[0, 0, 0, 127, 10, 127], [-5, 5, 20, 0, 9, 40]],
        };

        let json = serde_json::to_string(&job).expect("serialize");
        let restored: JobFile = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, job);

        // Flattening keeps the on-disk document a single flat object.
        let value: serde_json::Value = serde_json::from_str(&json).expect("as value");
        assert_eq!(value["source_world"], "overworld");
        assert_eq!(value["source_boxes"][0][3], 127);
    }
}
