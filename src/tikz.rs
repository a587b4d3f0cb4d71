use std::fmt::Write;
use log::{debug,trace,warn};
use rayon::prelude::*;

use crate::common::*;
use crate::math::*;
use crate::config::{Config,ErrorPolicy,Label,ShapeOrder};
use crate::path::{self,Point,Segment};
use crate::svg::{Document,PathElement,Rect,Shape};

fn coord(x:Real,y:Real,prec:usize)->String {
    format!("({}, {})",fmt_g(x,prec),fmt_g(y,prec))
}

fn point(p:Point,prec:usize)->String {
    coord(p.x,p.y,prec)
}

/// Render one segment.  Returns whether the fragment is joined with `--`,
/// and its text without that connector.
pub fn fragment(seg:&Segment,prec:usize)->(bool,String) {
    match *seg {
	Segment::Relative { dx,dy } => (true,format!("++{}",coord(dx,dy,prec))),
	Segment::Absolute { x,y } => (true,coord(x,y,prec)),
	Segment::Curve { c1,c2,dx,dy } =>
	    (false,format!(".. controls {} and {} .. ++{}",
			   point(c1,prec),
			   point(c2,prec),
			   coord(dx,dy,prec))),
	Segment::Cycle => (true,"cycle".to_string())
    }
}

/// Join segments into one path expression.  The first fragment loses its
/// `--`; curves always keep their controls.
pub fn segments_to_tikz(segs:&[Segment],prec:usize)->String {
    let mut code = String::new();
    for (i,seg) in segs.iter().enumerate() {
	let (line,frag) = fragment(seg,prec);
	if i > 0 {
	    code.push_str(if line { " -- " } else { " " });
	}
	code.push_str(&frag);
    }
    code
}

pub fn path_to_tikz(path:&PathElement,draw_options:&str,prec:usize)->
    Result<String,ConvError> {
    let segs = path::interpret(&path.d)?;
    trace!("Path {}: {} segments",path.class,segs.len());
    Ok(format!("\\draw[{}] {}; % {}\n",
	       draw_options,
	       segments_to_tikz(&segs,prec),
	       path.class))
}

pub fn rect_to_tikz(rect:&Rect,draw_options:&str,prec:usize)->String {
    let &Rect { x,y,width,height,ref class } = rect;
    format!("\\draw[{}] {} rectangle {}; % {}\n",
	    draw_options,
	    coord(x,y,prec),
	    coord(x + width,y + height,prec),
	    class)
}

pub fn label_to_tikz(label:&Label)->String {
    format!("\\node[draw, align=center, anchor=north west] at ({}, {}) {{{}}} \
	     edge[{}] ({}, {});\n",
	    fmt_f(label.x,3),
	    fmt_f(label.y,3),
	    label.text,
	    join_options(&[Some("-latex"),Some(label.style.as_str())]),
	    fmt_f(label.arrow_x,3),
	    fmt_f(label.arrow_y,3))
}

/// Join the non-empty option parts with commas
pub fn join_options(parts:&[Option<&str>])->String {
    parts.iter()
	.flatten()
	.filter(|u| !u.is_empty())
	.cloned()
	.collect::<Vec<&str>>()
	.join(", ")
}

pub struct Picture<'a> {
    config:&'a Config
}

impl<'a> Picture<'a> {
    pub fn new(config:&'a Config)->Self {
	Self { config }
    }

    pub fn shapes<'d>(&self,doc:&'d Document)->Vec<Shape<'d>> {
	let rects = doc.rects.iter().map(Shape::Rect);
	let paths = doc.paths.iter().map(Shape::Path);
	match self.config.shape_order {
	    ShapeOrder::RectsFirst => rects.chain(paths).collect(),
	    ShapeOrder::PathsFirst => paths.chain(rects).collect()
	}
    }

    /// Palette colors follow positions; `first` marks the first emitted shape
    fn shape_options(&self,index:usize,first:bool)->String {
	let first_style =
	    if first {
		self.config.first_shape_style.as_deref()
	    } else {
		None
	    };
	join_options(&[self.config.color(index),
			first_style,
			Some(self.config.draw_options.as_str())])
    }

    pub fn shape_to_tikz(&self,shape:Shape,index:usize,first:bool)->
	Result<String,ConvError> {
	let options = self.shape_options(index,first);
	let prec = self.config.precision;
	match shape {
	    Shape::Rect(r) => Ok(rect_to_tikz(r,&options,prec)),
	    Shape::Path(p) => path_to_tikz(p,&options,prec)
	}
    }

    pub fn render(&self,doc:&Document)->Res<String> {
	let ind = " ".repeat(self.config.indent);
	let scale = fmt_f(doc.view_box.extent(),3);
	let shapes = self.shapes(doc);
	debug!("Converting {} shapes",shapes.len());

	let lines : Vec<Result<String,ConvError>> = shapes
	    .par_iter()
	    .enumerate()
	    .map(|(i,&shape)| self.shape_to_tikz(shape,i,false))
	    .collect();

	let mut code = String::new();
	writeln!(code,"\\begin{{tikzpicture}}[x=\\linewidth/{}, y=-\\linewidth/{}, \
		       transform shape]",scale,scale)?;
	writeln!(code,"{}\\node[above right, inner sep=0] (image) at (0,0) \
		       {{\\includegraphics[width=\\hsize]{{{}}}}};",
		 ind,self.config.image)?;
	writeln!(code,"{}\\begin{{scope}}[shift={{(image.north west)}}]",ind)?;

	let mut emitted = false;
	for (i,(&shape,line)) in shapes.iter().zip(lines).enumerate() {
	    match line {
		Ok(line) => {
		    // Shapes that failed earlier do not take the first style
		    let line =
			if !emitted && self.config.first_shape_style.is_some() {
			    self.shape_to_tikz(shape,i,true)?
			} else {
			    line
			};
		    emitted = true;
		    code.push_str(&ind);
		    code.push_str(&ind);
		    code.push_str(&line);
		},
		Err(e) => match self.config.on_error {
		    ErrorPolicy::Abort =>
			return Err(error(&format!("Shape {}: {}",shape.class(),e))),
		    ErrorPolicy::Skip =>
			warn!("Skipping shape {}: {}",shape.class(),e)
		}
	    }
	}

	for label in self.config.labels.iter() {
	    code.push_str(&ind);
	    code.push_str(&ind);
	    code.push_str(&label_to_tikz(label));
	}

	writeln!(code,"{}\\end{{scope}}",ind)?;
	writeln!(code,"\\end{{tikzpicture}}")?;
	Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::ViewBox;

    fn path(d:&str,class:&str)->PathElement {
	PathElement { d:d.to_string(),class:class.to_string() }
    }

    fn rect(x:Real,y:Real,width:Real,height:Real,class:&str)->Rect {
	Rect { x,y,width,height,class:class.to_string() }
    }

    fn document()->Document {
	Document {
	    view_box:ViewBox { min_x:0.0,min_y:0.0,max_x:640.0,max_y:480.0 },
	    rects:vec![rect(1.0,2.0,3.0,4.0,"box")],
	    paths:vec![path("m0,0l10,10z","tri"),path("m1,1h2","bar")]
	}
    }

    #[test]
    fn test_rect() {
	assert_eq!(rect_to_tikz(&rect(1.0,2.0,3.0,4.0,"plate"),"",5),
		   "\\draw[] (1, 2) rectangle (4, 6); % plate\n");
	// Negative sizes are drawn inverted
	assert_eq!(rect_to_tikz(&rect(1.0,2.0,-3.0,-0.5,"neg"),"red",5),
		   "\\draw[red] (1, 2) rectangle (-2, 1.5); % neg\n");
    }

    #[test]
    fn test_path_lines() {
	assert_eq!(path_to_tikz(&path("m0,0l10,10z","tri"),"",5).unwrap(),
		   "\\draw[] ++(0, 0) -- ++(10, 10) -- cycle; % tri\n");
	assert_eq!(path_to_tikz(&path("m1.5,2h3v-4H7V8","x"),"blue",5).unwrap(),
		   "\\draw[blue] ++(1.5, 2) -- ++(3, 0) -- ++(0, -4) -- (7, -2) -- (7, 8); % x\n");
    }

    #[test]
    fn test_path_curves() {
	assert_eq!(path_to_tikz(&path("m10,10c1,2,3,4,5,6s1,1,2,2","c"),"",5).unwrap(),
		   "\\draw[] ++(10, 10) .. controls (11, 12) and (13, 14) .. ++(5, 6) \
		    .. controls (14, 15) and (16, 17) .. ++(2, 2); % c\n");
	// A leading curve keeps its controls
	assert_eq!(path_to_tikz(&path("c1,1,2,2,3,3l1,0","d"),"",5).unwrap(),
		   "\\draw[] .. controls (1, 1) and (2, 2) .. ++(3, 3) -- ++(1, 0); % d\n");
    }

    #[test]
    fn test_precision() {
	assert_eq!(path_to_tikz(&path("m0.333333,123456","p"),"",5).unwrap(),
		   "\\draw[] ++(0.33333, 1.2346e+05); % p\n");
	assert_eq!(path_to_tikz(&path("m0.333333,2","p"),"",3).unwrap(),
		   "\\draw[] ++(0.333, 2); % p\n");
    }

    #[test]
    fn test_path_errors() {
	assert_eq!(path_to_tikz(&path("m0,0q1,1","q"),"",5),
		   Err(ConvError::UnsupportedCommand('q')));
	assert!(matches!(path_to_tikz(&path("m0,0l1","t"),"",5),
			 Err(ConvError::MalformedCommand { .. })));
    }

    #[test]
    fn test_label() {
	let label = Label {
	    x:2.0,y:3.0,
	    text:"Text".to_string(),
	    arrow_x:100.0,arrow_y:120.0,
	    style:"red, thick".to_string()
	};
	assert_eq!(label_to_tikz(&label),
		   "\\node[draw, align=center, anchor=north west] at (2.000, 3.000) {Text} \
		    edge[-latex, red, thick] (100.000, 120.000);\n");
    }

    #[test]
    fn test_join_options() {
	assert_eq!(join_options(&[None,Some(""),None]),"");
	assert_eq!(join_options(&[Some("red"),None,Some("thick")]),"red, thick");
    }

    #[test]
    fn test_render() {
	let config = Config::default();
	let code = Picture::new(&config).render(&document()).unwrap();
	assert_eq!(code,
"\\begin{tikzpicture}[x=\\linewidth/640.000, y=-\\linewidth/640.000, transform shape]
    \\node[above right, inner sep=0] (image) at (0,0) {\\includegraphics[width=\\hsize]{path to image}};
    \\begin{scope}[shift={(image.north west)}]
        \\draw[] (1, 2) rectangle (4, 6); % box
        \\draw[] ++(0, 0) -- ++(10, 10) -- cycle; % tri
        \\draw[] ++(1, 1) -- ++(2, 0); % bar
    \\end{scope}
\\end{tikzpicture}
");
    }

    #[test]
    fn test_render_paths_first_with_colors() {
	let config = Config {
	    shape_order:ShapeOrder::PathsFirst,
	    apply_palette:true,
	    palette:vec!["red".to_string(),"green".to_string()],
	    first_shape_style:Some("thick".to_string()),
	    indent:2,
	    ..Config::default()
	};
	let code = Picture::new(&config).render(&document()).unwrap();
	let lines : Vec<&str> = code.lines().collect();
	assert_eq!(lines[3],"    \\draw[red, thick] ++(0, 0) -- ++(10, 10) -- cycle; % tri");
	assert_eq!(lines[4],"    \\draw[green] ++(1, 1) -- ++(2, 0); % bar");
	// Palette exhausted
	assert_eq!(lines[5],"    \\draw[] (1, 2) rectangle (4, 6); % box");
    }

    #[test]
    fn test_render_errors() {
	let mut doc = document();
	doc.paths.insert(1,path("m0,0a1,1","bad"));

	let config = Config::default();
	let e = Picture::new(&config).render(&doc).err().unwrap();
	assert_eq!(e.to_string(),"Shape bad: unsupported path command: 'a'");

	let config = Config { on_error:ErrorPolicy::Skip,..Config::default() };
	let code = Picture::new(&config).render(&doc).unwrap();
	assert!(!code.contains("% bad"));
	assert!(code.contains("% tri\n"));
	assert!(code.contains("% bar\n"));
    }

    #[test]
    fn test_first_style_after_skipped_shape() {
	let doc = Document {
	    view_box:ViewBox { min_x:0.0,min_y:0.0,max_x:10.0,max_y:10.0 },
	    rects:Vec::new(),
	    paths:vec![path("q1","bad"),path("m1,1","ok"),path("m2,2","next")]
	};
	let config = Config {
	    on_error:ErrorPolicy::Skip,
	    first_shape_style:Some("thick".to_string()),
	    apply_palette:true,
	    palette:vec!["red".to_string(),"green".to_string()],
	    ..Config::default()
	};
	let code = Picture::new(&config).render(&doc).unwrap();
	let lines : Vec<&str> = code.lines().collect();
	// The failed shape keeps its palette slot
	assert_eq!(lines[3],"        \\draw[green, thick] ++(1, 1); % ok");
	assert_eq!(lines[4],"        \\draw[] ++(2, 2); % next");
	assert!(!code.contains("% bad"));
    }

    #[test]
    fn test_labels_inside_scope() {
	let config = Config {
	    labels:vec![Label {
		x:10.0,y:10.0,
		text:"Metal plate".to_string(),
		arrow_x:150.0,arrow_y:120.0,
		style:"green, thick".to_string()
	    }],
	    ..Config::default()
	};
	let code = Picture::new(&config).render(&document()).unwrap();
	let lines : Vec<&str> = code.lines().collect();
	assert_eq!(lines.len(),9);
	assert!(lines[6].starts_with("        \\node[draw"));
	assert!(lines[6].contains("{Metal plate}"));
	assert_eq!(lines[7],"    \\end{scope}");
    }

    #[test]
    fn test_render_idempotent() {
	let config = Config { apply_palette:true,..Config::default() };
	let doc = document();
	let picture = Picture::new(&config);
	assert_eq!(picture.render(&doc).unwrap(),picture.render(&doc).unwrap());
    }
}
