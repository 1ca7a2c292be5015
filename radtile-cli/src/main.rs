use clap::{Parser, Subcommand};
use log::{debug, info};
use radtile_model::data::Cut;
use radtile_render::bounds::{find_intersecting_tiles, test_tile_intersection};
use radtile_render::render_tile;
use rayon::prelude::*;
use std::collections::VecDeque;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::{fs, io};

/// Radius of the rendered coverage disk around the radar site.
const COVERAGE_RADIUS_METERS: f64 = 300_000.0;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "radtile")]
#[command(author, version, about = "Extract radar elevation cuts and render web-Mercator tiles")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read an Archive-2 volume from stdin and write the lowest reflectivity
    /// cut to <site>.base
    Extract,

    /// Render one tile to a PNG if it intersects the coverage disk, printing
    /// 200 on a hit and 404 otherwise
    GenOne {
        /// Serialized cut produced by `extract`
        basefile: PathBuf,
        tile_x: i64,
        tile_y: i64,
        zoom: u8,
        /// Output PNG path
        outfile: PathBuf,
    },

    /// Render every tile intersecting the coverage disk between two zoom
    /// levels into out/
    Generate {
        /// Serialized cut produced by `extract`
        basefile: PathBuf,
        start_zoom: u8,
        end_zoom: u8,
    },

    /// As generate, but stop descending below tiles that render with no
    /// significant data
    GenThresh {
        /// Serialized cut produced by `extract`
        basefile: PathBuf,
        start_zoom: u8,
        end_zoom: u8,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Extract => extract(),
        Command::GenOne {
            basefile,
            tile_x,
            tile_y,
            zoom,
            outfile,
        } => gen_one(&basefile, tile_x, tile_y, zoom, &outfile),
        Command::Generate {
            basefile,
            start_zoom,
            end_zoom,
        } => generate(&basefile, start_zoom, end_zoom),
        Command::GenThresh {
            basefile,
            start_zoom,
            end_zoom,
        } => gen_thresh(&basefile, start_zoom, end_zoom),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn extract() -> CliResult<()> {
    let mut data = Vec::new();
    io::stdin().read_to_end(&mut data)?;

    let file = radtile_data::volume::File::new(data);
    let cut = file.cut()?.ok_or("archive contains no volume scan start")?;

    let filename = format!("{}.base", cut.radar_identifier());
    fs::write(&filename, cut.to_bytes()?)?;
    info!("wrote {filename}: {} radials", cut.radials().len());

    Ok(())
}

fn gen_one(basefile: &Path, tile_x: i64, tile_y: i64, zoom: u8, outfile: &Path) -> CliResult<()> {
    let cut = load_cut(basefile)?;
    let (lat, lon) = site_radians(&cut);

    if test_tile_intersection(tile_x, tile_y, zoom, lat, lon, COVERAGE_RADIUS_METERS) {
        let tile = render_tile(&cut, tile_x, tile_y, zoom);
        tile.into_image()?.save(outfile)?;
        println!("200");
    } else {
        println!("404");
    }

    Ok(())
}

fn generate(basefile: &Path, start_zoom: u8, end_zoom: u8) -> CliResult<()> {
    let cut = load_cut(basefile)?;
    let (lat, lon) = site_radians(&cut);

    let tiles = find_intersecting_tiles((0, 0, 1), lat, lon, COVERAGE_RADIUS_METERS, end_zoom);
    fs::create_dir_all("out")?;

    // Tiles are independent pure functions of the (shared, immutable) cut, so
    // render them across the worker pool.
    let failures: Vec<String> = tiles
        .par_iter()
        .filter(|(_, _, zoom)| *zoom >= start_zoom)
        .filter_map(|&(tile_x, tile_y, zoom)| {
            let path = tile_path(cut.radar_identifier(), tile_x, tile_y, zoom);
            info!("rendering {path}");

            let tile = render_tile(&cut, tile_x, tile_y, zoom);
            match tile.into_image().map_err(|e| e.to_string()) {
                Ok(image) => image.save(&path).map_err(|e| e.to_string()).err(),
                Err(err) => Some(err),
            }
        })
        .collect();

    if let Some(first) = failures.into_iter().next() {
        return Err(first.into());
    }

    Ok(())
}

fn gen_thresh(basefile: &Path, start_zoom: u8, end_zoom: u8) -> CliResult<()> {
    let cut = load_cut(basefile)?;
    let (lat, lon) = site_radians(&cut);

    fs::create_dir_all("out")?;

    let mut queue = VecDeque::from([(0i64, 0i64, 1u8)]);
    let mut generated = 0u32;

    while let Some((tile_x, tile_y, zoom)) = queue.pop_front() {
        let mut subdivide = true;

        if zoom < start_zoom {
            debug!("tile {zoom}/{tile_x}-{tile_y} below start zoom, not rendering");
        } else {
            let tile = render_tile(&cut, tile_x, tile_y, zoom);
            subdivide = tile.has_significant_data();

            let path = tile_path(cut.radar_identifier(), tile_x, tile_y, zoom);
            tile.into_image()?.save(&path)?;
            generated += 1;
            info!("[{generated} done, {} queued] wrote {path}", queue.len());

            if !subdivide {
                debug!("tile {zoom}/{tile_x}-{tile_y} has no significant data, pruning");
            }
        }

        if subdivide && zoom < end_zoom {
            let child_x = tile_x * 2;
            let child_y = tile_y * 2;
            for (x, y) in [
                (child_x, child_y),
                (child_x + 1, child_y),
                (child_x, child_y + 1),
                (child_x + 1, child_y + 1),
            ] {
                if test_tile_intersection(x, y, zoom + 1, lat, lon, COVERAGE_RADIUS_METERS) {
                    queue.push_back((x, y, zoom + 1));
                }
            }
        }
    }

    Ok(())
}

fn load_cut(path: &Path) -> CliResult<Cut> {
    let bytes = fs::read(path)?;
    Ok(Cut::from_bytes(&bytes)?)
}

fn site_radians(cut: &Cut) -> (f64, f64) {
    (
        (cut.latitude_degrees() as f64).to_radians(),
        (cut.longitude_degrees() as f64).to_radians(),
    )
}

fn tile_path(site: &str, tile_x: i64, tile_y: i64, zoom: u8) -> String {
    format!("out/{site}_{zoom}_{tile_x}-{tile_y}.png")
}
