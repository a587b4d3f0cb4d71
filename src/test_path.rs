#![allow(dead_code)]

mod math;
mod common;
mod config;
mod path;
mod svg;
mod tikz;

use pico_args::Arguments;

use common::*;
use svg::PathElement;

fn main()->Res<()> {
    let mut args = Arguments::from_env();
    let d : String = args.value_from_str("--d")?;
    let precision : usize = args.opt_value_from_str("--precision")?.unwrap_or(5);
    println!("Path: {}",d);

    let mut interp = path::PathInterpreter::new();
    let res = interp.run(&d);
    println!("{:#?}",interp.segments());
    println!("Cursor: {:?}",interp.position());
    res?;

    let p = PathElement { d,class:"-".to_string() };
    print!("{}",tikz::path_to_tikz(&p,"",precision)?);
    Ok(())
}
