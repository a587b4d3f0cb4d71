#![allow(dead_code)]

mod math;
mod common;
mod config;
mod path;
mod svg;
mod tikz;

use log::{info,error,LevelFilter};
use std::fs::File;
use std::io::{Write,BufWriter};
use pico_args::Arguments;

use common::*;
use config::{Config,ErrorPolicy,Loadable,ShapeOrder};
use svg::Document;
use tikz::Picture;

const USAGE : &str = "\
Usage: svgtikz [OPTIONS] INPUT.svg

Options:
  --config FILE       RON configuration file
  --output FILE       write to FILE instead of stdout
  --image NAME        image placed under the drawing
  --precision N       significant digits of coordinates
  --first-style TEXT  extra options for the first shape
  --colors            color shapes from the palette
  --paths-first       emit paths before rectangles
  --skip-errors       skip shapes that fail to convert
";

fn main()->Res<()> {
    simple_logger::SimpleLogger::new()
	.with_level(LevelFilter::Info)
	.env()
	.init()?;

    let res = main0();
    if let Err(e) = &res {
	error!("{}",e);
    }

    res
}

fn main0()->Res<()> {
    let mut args = Arguments::from_env();

    if args.contains(["-h","--help"]) {
	print!("{}",USAGE);
	return Ok(());
    }

    let config_fn : Option<String> = args.opt_value_from_str("--config")?;
    let mut config =
	match config_fn {
	    Some(config_fn) => {
		info!("Loading configuration from {}",config_fn);
		Config::load(&config_fn)?
	    },
	    None => Config::default()
	};

    if let Some(image) = args.opt_value_from_str("--image")? {
	config.image = image;
    }
    if let Some(precision) = args.opt_value_from_str("--precision")? {
	config.precision = precision;
    }
    if let Some(style) = args.opt_value_from_str("--first-style")? {
	config.first_shape_style = Some(style);
    }
    if args.contains("--colors") {
	config.apply_palette = true;
    }
    if args.contains("--paths-first") {
	config.shape_order = ShapeOrder::PathsFirst;
    }
    if args.contains("--skip-errors") {
	config.on_error = ErrorPolicy::Skip;
    }
    let output : Option<String> = args.opt_value_from_str("--output")?;
    let input : String = args.free_from_str()?;

    let rest = args.finish();
    if !rest.is_empty() {
	return Err(error(&format!("Unexpected arguments: {:?}",rest)));
    }

    info!("Loading {}",input);
    let doc = Document::from_file(&input)?;
    info!("View box {:?}, {} rectangles, {} paths",
	  doc.view_box,
	  doc.rects.len(),
	  doc.paths.len());

    let code = Picture::new(&config).render(&doc)?;

    match output {
	Some(output) => {
	    info!("Writing {}",output);
	    let fd = File::create(output)?;
	    let mut fd = BufWriter::new(fd);
	    fd.write_all(code.as_bytes())?;
	    fd.flush()?;
	},
	None => {
	    let stdout = std::io::stdout();
	    let mut fd = stdout.lock();
	    fd.write_all(code.as_bytes())?;
	    fd.flush()?;
	}
    }

    Ok(())
}
