use serde::{Serialize,Deserialize};
use std::{
    fs::File,
    path::Path
};

use crate::{
    common::*,
    math::*
};

#[derive(Clone,Copy,Serialize,Deserialize,Debug,PartialEq,Eq)]
pub enum ShapeOrder {
    RectsFirst,
    PathsFirst
}

/// What to do when one shape fails to convert
#[derive(Clone,Copy,Serialize,Deserialize,Debug,PartialEq,Eq)]
pub enum ErrorPolicy {
    Abort,
    Skip
}

/// Text box with an arrow pointing at (arrow_x,arrow_y)
#[derive(Clone,Serialize,Deserialize,Debug,PartialEq)]
pub struct Label {
    pub x:Real,
    pub y:Real,
    pub text:String,
    pub arrow_x:Real,
    pub arrow_y:Real,
    #[serde(default)]
    pub style:String
}

#[derive(Clone,Serialize,Deserialize,Debug)]
#[serde(default)]
pub struct Config {
    pub image:String,
    pub indent:usize,
    pub precision:usize,
    pub shape_order:ShapeOrder,
    pub apply_palette:bool,
    pub palette:Vec<String>,
    pub first_shape_style:Option<String>,
    pub draw_options:String,
    pub on_error:ErrorPolicy,
    pub labels:Vec<Label>
}

pub const DEFAULT_PALETTE : [&str;10] = [
    "red","green","blue","orange","violet",
    "cyan","magenta","brown","teal","olive"
];

impl Default for Config {
    fn default()->Self {
	Self {
	    image:"path to image".to_string(),
	    indent:4,
	    precision:5,
	    shape_order:ShapeOrder::RectsFirst,
	    apply_palette:false,
	    palette:DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
	    first_shape_style:None,
	    draw_options:String::new(),
	    on_error:ErrorPolicy::Abort,
	    labels:Vec::new()
	}
    }
}

impl Config {
    /// Palette color for the shape at position `index`, if any is left
    pub fn color(&self,index:usize)->Option<&str> {
	if self.apply_palette {
	    self.palette.get(index).map(|c| c.as_str())
	} else {
	    None
	}
    }
}

pub trait Loadable {
    fn load<P:AsRef<Path>>(path:P)->Res<Self>
    where Self:Sized,for<'a> Self:Deserialize<'a> {
	let fd = File::open(path)?;
	let this : Self = ron::de::from_reader(fd)?;
	Ok(this)
    }

    fn parse(u:&str)->Res<Self>
    where Self:Sized,for<'a> Self:Deserialize<'a> {
	let this : Self = ron::de::from_str(u)?;
	Ok(this)
    }
}

impl Loadable for Config { }
