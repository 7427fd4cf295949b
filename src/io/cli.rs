//! Command-line interface for batch analysis of force-map directories

use crate::analysis::EnsembleAggregator;
use crate::io::configuration::{
    AnalysisConfig, GridFallback, METRES_TO_MICROMETRES, SETPOINT_COLORMAP_SUFFIX,
    SETPOINT_GRAY_SUFFIX, SETPOINT_TABLE_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::export::{write_curve, write_ensemble, write_records};
use crate::io::image::{export_colormap_png, export_components_png, export_grayscale_png};
use crate::io::progress::ProgressManager;
use crate::io::provider::{CurveProvider, JsonCurveProvider, map_name};
use crate::model::{Channel, ForceMap};
use crate::pipeline::tasks::{
    collect_phase_average, curve_summary, curve_table, hold_component_curves, setpoint_image,
    setpoint_records, steepness_records, summarize_slopes,
};
use crate::pipeline::{GroupPhase, MapSelection, Units, collect_maps};
use crate::spatial::GridPlacement;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "forcemap")]
#[command(
    author,
    version,
    about = "Spatially resolved analysis of AFM force-map curves"
)]
/// Command-line arguments for the force-map analysis tool
pub struct Cli {
    /// Analysis to run
    #[command(subcommand)]
    pub command: Command,

    /// Only report warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// JSON file overriding the default analysis configuration
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Leave curves without explicit grid indices unplaced instead of assuming row-major order
    #[arg(long, global = true)]
    pub exclude_unindexed: bool,
}

/// Available analyses
#[derive(Subcommand)]
pub enum Command {
    /// Setpoint-height image of every map (afmhot PNG, grayscale PNG and CSV)
    Setpoint {
        /// Map file or directory of map files
        #[arg(value_name = "TARGET")]
        target: PathBuf,
        /// Output directory (defaults to the directory of each map)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Hold-phase height mean and std per connected mask component, on absolute time
    HoldCurves {
        /// Maps, masks and output location
        #[command(flatten)]
        io: MaskedArgs,
        /// Samples on the common time axis
        #[arg(long)]
        time_points: Option<usize>,
    },
    /// Per-group, per-phase progress-normalized mean and std of a channel over masked curves
    PhaseAverage {
        /// Maps, masks and output location
        #[command(flatten)]
        io: MaskedArgs,
        /// Curve quantity to average
        #[arg(long, value_enum, default_value_t)]
        channel: Channel,
    },
    /// Hold-phase steepness of every masked curve with per-group summaries
    Steepness {
        /// Maps, masks and output location
        #[command(flatten)]
        io: MaskedArgs,
    },
    /// Export time, force, indentation and segment of one curve
    ExportCurve(ExportArgs),
}

/// Inputs and outputs shared by the mask-based analyses
#[derive(Args, Clone)]
pub struct MaskedArgs {
    /// Map file or directory of map files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,
    /// Directory holding one annotation raster per map
    #[arg(long)]
    pub masks: PathBuf,
    /// Output directory
    #[arg(long)]
    pub out: PathBuf,
}

/// Arguments of the single-curve export
#[derive(Args, Clone)]
pub struct ExportArgs {
    /// Map file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    /// Sequential curve index
    #[arg(long)]
    pub idx: Option<usize>,
    /// Grid row of the curve
    #[arg(long)]
    pub row: Option<usize>,
    /// Grid column of the curve
    #[arg(long)]
    pub col: Option<usize>,
    /// Unit system of the exported columns
    #[arg(long, value_enum, default_value_t)]
    pub units: Units,
    /// Output CSV (defaults to `<map>_curve<idx>.csv` beside the map)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// How the exported curve is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveSelector {
    /// Sequential index
    Index(usize),
    /// Row-major grid cell
    Cell {
        /// Grid row
        row: usize,
        /// Grid column
        col: usize,
    },
}

impl CurveSelector {
    /// Sequential curve index within a map
    ///
    /// # Errors
    ///
    /// Returns an error if a grid cell is given and the map lacks a grid shape or
    /// the cell lies outside it
    pub fn resolve(self, map: &ForceMap) -> Result<usize> {
        match self {
            Self::Index(index) => Ok(index),
            Self::Cell { row, col } => map.index_of_cell(row, col),
        }
    }
}

impl ExportArgs {
    /// Curve addressed by the arguments
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `--idx` is combined with `--row`/`--col`,
    /// when only one of `--row` and `--col` is given, or when nothing is given
    pub fn selector(&self) -> Result<CurveSelector> {
        match (self.idx, self.row, self.col) {
            (Some(index), None, None) => Ok(CurveSelector::Index(index)),
            (Some(_), _, _) => Err(invalid_parameter(
                "idx",
                &"--idx with --row/--col",
                &"use either --idx or --row and --col",
            )),
            (None, Some(row), Some(col)) => Ok(CurveSelector::Cell { row, col }),
            (None, Some(_), None) => Err(invalid_parameter(
                "row",
                &"--row without --col",
                &"--row requires --col",
            )),
            (None, None, Some(_)) => Err(invalid_parameter(
                "col",
                &"--col without --row",
                &"--col requires --row",
            )),
            (None, None, None) => Err(invalid_parameter(
                "idx",
                &"nothing",
                &"give --idx or --row and --col",
            )),
        }
    }
}

impl Cli {
    /// Configuration from the defaults, the optional file and the command-line overrides
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file is unreadable or any value is invalid
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };
        if self.exclude_unindexed {
            config.grid_fallback = GridFallback::Exclude;
        }
        if let Command::HoldCurves {
            time_points: Some(points),
            ..
        } = self.command
        {
            config.time_points = points;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs one analysis over a batch of maps, skipping maps that fail
pub struct FileProcessor {
    config: AnalysisConfig,
    show_progress: bool,
    provider: JsonCurveProvider,
}

impl FileProcessor {
    /// Create a processor with a validated configuration
    pub const fn new(config: AnalysisConfig, show_progress: bool) -> Self {
        Self {
            config,
            show_progress,
            provider: JsonCurveProvider,
        }
    }

    /// Build the processor for parsed command-line arguments
    ///
    /// # Errors
    ///
    /// Returns a configuration error before any map is touched
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self::new(cli.analysis_config()?, cli.should_show_progress()))
    }

    /// Run a command
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be listed, or for the batch-level
    /// outputs (phase averages, steepness tables) if they cannot be written.
    /// Failures of individual maps are logged and skipped.
    pub fn run(&self, command: &Command) -> Result<()> {
        match command {
            Command::Setpoint { target, out } => self.setpoint(target, out.as_deref()),
            Command::HoldCurves { io, .. } => self.hold_curves(io),
            Command::PhaseAverage { io, channel } => self.phase_average(io, *channel),
            Command::Steepness { io } => self.steepness(io),
            Command::ExportCurve(args) => self.export_curve(args),
        }
    }

    /// Load every map of `target` and hand it to `process`
    ///
    /// A map whose loading or processing fails is reported and skipped. Returns the
    /// number of maps processed successfully.
    fn for_each_map(
        &self,
        target: &Path,
        mut process: impl FnMut(&ForceMap) -> Result<()>,
    ) -> Result<usize> {
        let files = collect_maps(target)?;
        if files.is_empty() {
            log::warn!("No map files found in {}", target.display());
            return Ok(0);
        }

        let mut progress = ProgressManager::new(files.len(), self.show_progress);
        for path in &files {
            progress.start_map(path);
            let outcome = self
                .provider
                .load(path)
                .and_then(|map| process(&map));
            match outcome {
                Ok(()) => progress.complete_map(),
                Err(err) => {
                    progress.skip_map();
                    log::warn!("Skip {}: {err}", map_name(path));
                }
            }
        }
        progress.finish();

        log::info!(
            "Processed {} of {} maps ({} skipped)",
            progress.completed(),
            files.len(),
            progress.skipped()
        );
        Ok(progress.completed())
    }

    fn setpoint(&self, target: &Path, out: Option<&Path>) -> Result<()> {
        let fallback = self.config.grid_fallback;
        self.for_each_map(target, |map| {
            let shape = map.grid_shape()?;
            let placement = GridPlacement::resolve_map(map, shape, fallback);
            let image = setpoint_image(map, &placement);

            let directory = out.map_or_else(|| map_directory(target), Path::to_path_buf);
            let base = map.name();
            let colormap = directory.join(format!("{base}{SETPOINT_COLORMAP_SUFFIX}"));
            let gray = directory.join(format!("{base}{SETPOINT_GRAY_SUFFIX}"));
            let table = directory.join(format!("{base}{SETPOINT_TABLE_SUFFIX}"));

            export_colormap_png(&image, &colormap)?;
            export_grayscale_png(&image, &gray)?;
            write_records(&table, &setpoint_records(&image))?;
            log::info!("Saved {}", colormap.display());
            Ok(())
        })?;
        Ok(())
    }

    fn hold_curves(&self, io: &MaskedArgs) -> Result<()> {
        self.for_each_map(&io.target, |map| {
            let selection = MapSelection::load(map, &io.masks, &self.config)?;
            let base = map.name();
            let directory = io.out.join(base);

            let labels_path = directory.join(format!("{base}_components.png"));
            export_components_png(selection.components(), &labels_path)?;

            let curves = hold_component_curves(map, &selection, &self.config);
            if curves.is_empty() {
                log::warn!("{base}: no component has a common hold span");
            }
            for (id, stat) in &curves {
                let path = directory.join(format!("{base}_comp{id:03}_hold_avg_time.csv"));
                let keys = [("file", base.to_string()), ("component_id", id.to_string())];
                write_ensemble(&path, &keys, "height_um", METRES_TO_MICROMETRES, stat)?;
                log::info!("Saved {}", path.display());
            }
            Ok(())
        })?;
        Ok(())
    }

    fn phase_average(&self, io: &MaskedArgs, channel: Channel) -> Result<()> {
        let mut aggregator: EnsembleAggregator<GroupPhase> = EnsembleAggregator::new();
        self.for_each_map(&io.target, |map| {
            let selection = MapSelection::load(map, &io.masks, &self.config)?;
            let accepted =
                collect_phase_average(map, &selection, &self.config, channel, &mut aggregator);
            log::info!(
                "{}: {accepted} phase series from {} masked curves",
                map.name(),
                selection.selected().len()
            );
            Ok(())
        })?;

        if aggregator.is_empty() {
            log::warn!("No phase averages computed");
            return Ok(());
        }

        for ((group, phase), stat) in aggregator.finish() {
            let path = io.out.join(format!(
                "{group}_{phase}_{}_avg.csv",
                channel.column_name()
            ));
            let keys = [("group", group.clone()), ("phase", phase.to_string())];
            write_ensemble(&path, &keys, channel.column_name(), 1.0, &stat)?;
            log::info!("Saved {}", path.display());
        }
        Ok(())
    }

    fn steepness(&self, io: &MaskedArgs) -> Result<()> {
        let mut records = Vec::new();
        self.for_each_map(&io.target, |map| {
            let selection = MapSelection::load(map, &io.masks, &self.config)?;
            records.extend(steepness_records(map, &selection, &self.config));
            Ok(())
        })?;

        if records.is_empty() {
            log::warn!("No hold slopes computed");
            return Ok(());
        }

        let per_curve = io.out.join("hold_steepness.csv");
        write_records(&per_curve, &records)?;
        log::info!("Saved {}", per_curve.display());

        let summary = io.out.join("hold_steepness_summary.csv");
        write_records(&summary, &summarize_slopes(&records))?;
        log::info!("Saved {}", summary.display());
        Ok(())
    }

    fn export_curve(&self, args: &ExportArgs) -> Result<()> {
        let selector = args.selector()?;
        let map = self.provider.load(&args.file)?;
        let index = selector.resolve(&map)?;
        let table = curve_table(&map, index, args.units)?;
        if let Some(summary) = curve_summary(&map, index) {
            log::info!("{summary}");
        }

        let path = args.out.clone().unwrap_or_else(|| {
            map_directory(&args.file).join(format!("{}_curve{index}.csv", map.name()))
        });
        write_curve(&path, &table)?;
        log::info!("Saved {}", path.display());
        Ok(())
    }
}

/// Directory that holds a map file, or the directory itself when given one
fn map_directory(target: &Path) -> PathBuf {
    if target.is_dir() {
        target.to_path_buf()
    } else {
        target
            .parent()
            .map_or_else(PathBuf::new, Path::to_path_buf)
    }
}
