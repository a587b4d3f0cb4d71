use std::fs::File;
use std::path::Path;
use std::io::Read;
use std::str::FromStr;
use regex::Regex;

use crate::common::*;
use crate::math::*;

pub const SVG_NS : &str = "http://www.w3.org/2000/svg";

/// Extent of the drawing, read as `min_x min_y max_x max_y`
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct ViewBox {
    pub min_x:Real,
    pub min_y:Real,
    pub max_x:Real,
    pub max_y:Real
}

impl ViewBox {
    pub fn width(&self)->Real {
	self.max_x - self.min_x
    }

    pub fn height(&self)->Real {
	self.max_y - self.min_y
    }

    pub fn extent(&self)->Real {
	self.width().max(self.height())
    }
}

impl FromStr for ViewBox {
    type Err = Box<dyn Error>;
    fn from_str(u:&str)->Res<Self> {
	let sep_rex = Regex::new(r"[\s,]+")?;
	let fields : Vec<&str> = sep_rex.split(u.trim()).collect();
	if fields.len() != 4 {
	    return Err(Box::new(ConvError::BadViewBox(u.to_string())));
	}
	let mut xs = [0.0;4];
	for (x,f) in xs.iter_mut().zip(fields.iter()) {
	    *x = f.parse()
		.map_err(|_| ConvError::BadViewBox(u.to_string()))?;
	}
	let [min_x,min_y,max_x,max_y] = xs;
	Ok(Self { min_x,min_y,max_x,max_y })
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct Rect {
    pub x:Real,
    pub y:Real,
    pub width:Real,
    pub height:Real,
    pub class:String
}

#[derive(Debug,Clone,PartialEq)]
pub struct PathElement {
    pub d:String,
    pub class:String
}

#[derive(Debug,Clone,Copy)]
pub enum Shape<'a> {
    Rect(&'a Rect),
    Path(&'a PathElement)
}

impl<'a> Shape<'a> {
    pub fn class(&self)->&'a str {
	match *self {
	    Shape::Rect(r) => &r.class,
	    Shape::Path(p) => &p.class
	}
    }
}

pub struct Document {
    pub view_box:ViewBox,
    pub rects:Vec<Rect>,
    pub paths:Vec<PathElement>
}

fn attr<'a>(node:&roxmltree::Node<'a,'_>,name:&str)->Result<&'a str,ConvError> {
    node.attribute(name).ok_or_else(|| ConvError::MissingAttribute {
	element:node.tag_name().name().to_string(),
	name:name.to_string()
    })
}

fn real_attr(node:&roxmltree::Node,name:&str)->Res<Real> {
    let u = attr(node,name)?;
    let x : Real = u.trim().parse()
	.map_err(|_| ConvError::MalformedNumber {
	    text:u.to_string(),
	    start:0,
	    end:u.len()
	})?;
    Ok(x)
}

impl Document {
    pub fn parse(u:&str)->Res<Self> {
	let doc = roxmltree::Document::parse(u)?;
	let root = doc.root_element();
	let view_box : ViewBox = attr(&root,"viewBox")?.parse()?;

	let mut rects = Vec::new();
	let mut paths = Vec::new();
	for node in root.descendants() {
	    if !node.is_element() || node.tag_name().namespace() != Some(SVG_NS) {
		continue;
	    }
	    match node.tag_name().name() {
		"rect" => rects.push(Rect {
		    x:real_attr(&node,"x")?,
		    y:real_attr(&node,"y")?,
		    width:real_attr(&node,"width")?,
		    height:real_attr(&node,"height")?,
		    class:attr(&node,"class")?.to_string()
		}),
		"path" => paths.push(PathElement {
		    d:attr(&node,"d")?.to_string(),
		    class:attr(&node,"class")?.to_string()
		}),
		_ => ()
	    }
	}
	Ok(Self { view_box,rects,paths })
    }

    pub fn from_file<P:AsRef<Path>>(path:P)->Res<Self> {
	let mut fd = File::open(path)?;
	let mut u = String::new();
	fd.read_to_string(&mut u)?;
	Self::parse(&u)
    }
}
