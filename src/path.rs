// Compact path command strings, as found in the `d` attribute.
//
// Only the relative move/line/curve subset plus the absolute H and V
// commands are understood.  See
// https://developer.mozilla.org/en-US/docs/Web/SVG/Attribute/d

use crate::common::*;
use crate::math::*;

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Point {
    pub x:Real,
    pub y:Real
}

impl Point {
    pub fn new(x:Real,y:Real)->Self {
	Self { x,y }
    }
}

/// Cursor over an immutable command string.  Offsets are byte offsets.
pub struct Scanner<'a> {
    src:&'a str,
    pos:usize
}

impl<'a> Scanner<'a> {
    pub fn new(src:&'a str)->Self {
	Self { src,pos:0 }
    }

    pub fn at(src:&'a str,pos:usize)->Self {
	Self { src,pos:pos.min(src.len()) }
    }

    pub fn pos(&self)->usize {
	self.pos
    }

    pub fn is_done(&self)->bool {
	self.pos >= self.src.len()
    }

    /// Next character, `None` at the end or off a character boundary
    pub fn peek(&self)->Option<char> {
	self.src.get(self.pos..)?.chars().next()
    }

    pub fn advance(&mut self) {
	if let Some(c) = self.peek() {
	    self.pos += c.len_utf8();
	}
    }

    pub fn skip_whitespace(&mut self) {
	while let Some(c) = self.peek() {
	    if !c.is_whitespace() {
		break;
	    }
	    self.advance();
	}
    }

    /// Consume one numeric literal: an optional sign, an optional dot and
    /// any number of digits.  Once a dot or a digit has been seen no sign
    /// is accepted, and only one dot per literal.
    pub fn next_number(&mut self)->Result<Real,ConvError> {
	let start = self.pos;
	let mut sign_found = false;
	let mut dot_found = false;
	while let Some(c) = self.peek() {
	    match c {
		'+' | '-' if !sign_found => sign_found = true,
		'.' if !dot_found => {
		    sign_found = true;
		    dot_found = true;
		},
		'0'..='9' => sign_found = true,
		_ => break
	    }
	    self.advance();
	}
	let text = self.src.get(start..self.pos).unwrap_or("");
	text.parse().map_err(|_| ConvError::MalformedNumber {
	    text:text.to_string(),
	    start,
	    end:self.pos
	})
    }

    /// Read up to `n` numbers, skipping one separator character after each
    /// of them.  Stops early at the end of the string, so the result may
    /// hold fewer than `n` numbers.
    pub fn next_numbers(&mut self,n:usize)->Result<Vec<Real>,ConvError> {
	let mut numbers = Vec::with_capacity(n);
	for _ in 0..n {
	    numbers.push(self.next_number()?);
	    match self.peek() {
		None => break,
		Some(c) if is_separator(c) => self.advance(),
		_ => ()
	    }
	}
	Ok(numbers)
    }
}

fn is_separator(c:char)->bool {
    !c.is_ascii_digit() && !c.is_alphabetic() && !"+-.".contains(c)
}

pub fn next_number(u:&str,start:usize)->Result<(Real,usize),ConvError> {
    let mut sc = Scanner::at(u,start);
    let x = sc.next_number()?;
    Ok((x,sc.pos()))
}

pub fn next_multiple_numbers(u:&str,start:usize,n:usize)->
    Result<(Vec<Real>,usize),ConvError> {
    let mut sc = Scanner::at(u,start);
    let xs = sc.next_numbers(n)?;
    Ok((xs,sc.pos()))
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Command {
    MoveRel,
    HorizontalRel,
    HorizontalAbs,
    VerticalRel,
    VerticalAbs,
    LineRel,
    CubicRel,
    SmoothCubicRel,
    Close
}

impl TryFrom<char> for Command {
    type Error = ConvError;
    fn try_from(c:char)->Result<Self,ConvError> {
	match c {
	    'm' => Ok(Self::MoveRel),
	    'h' => Ok(Self::HorizontalRel),
	    'H' => Ok(Self::HorizontalAbs),
	    'v' => Ok(Self::VerticalRel),
	    'V' => Ok(Self::VerticalAbs),
	    'l' => Ok(Self::LineRel),
	    'c' => Ok(Self::CubicRel),
	    's' => Ok(Self::SmoothCubicRel),
	    'z' | 'Z' => Ok(Self::Close),
	    _ => Err(ConvError::UnsupportedCommand(c))
	}
    }
}

impl Command {
    pub fn letter(&self)->char {
	match self {
	    Self::MoveRel => 'm',
	    Self::HorizontalRel => 'h',
	    Self::HorizontalAbs => 'H',
	    Self::VerticalRel => 'v',
	    Self::VerticalAbs => 'V',
	    Self::LineRel => 'l',
	    Self::CubicRel => 'c',
	    Self::SmoothCubicRel => 's',
	    Self::Close => 'z'
	}
    }

    /// Number of arguments consumed per application
    pub fn arity(&self)->usize {
	match self {
	    Self::MoveRel | Self::LineRel => 2,
	    Self::HorizontalRel | Self::HorizontalAbs |
	    Self::VerticalRel | Self::VerticalAbs => 1,
	    Self::CubicRel => 6,
	    Self::SmoothCubicRel => 4,
	    Self::Close => 0
	}
    }
}

/// One emitted drawing instruction
#[derive(Debug,Clone,PartialEq)]
pub enum Segment {
    /// Straight line by a relative offset
    Relative { dx:Real,dy:Real },
    /// Straight line to an absolute point
    Absolute { x:Real,y:Real },
    /// Cubic curve with absolute control points, ending at a relative offset
    Curve { c1:Point,c2:Point,dx:Real,dy:Real },
    Cycle
}

pub struct PathInterpreter {
    pub x:Real,
    pub y:Real,
    command:Option<Command>,
    offset:usize,
    segments:Vec<Segment>
}

impl PathInterpreter {
    pub fn new()->Self {
	Self {
	    x:0.0,
	    y:0.0,
	    command:None,
	    offset:0,
	    segments:Vec::new()
	}
    }

    pub fn position(&self)->Point {
	Point::new(self.x,self.y)
    }

    pub fn segments(&self)->&[Segment] {
	&self.segments
    }

    pub fn into_segments(self)->Vec<Segment> {
	self.segments
    }

    /// Apply one command to the cursor.  Fails unless `args` holds exactly
    /// `command.arity()` numbers, leaving the cursor untouched.
    pub fn step(&mut self,command:Command,args:&[Real])->Result<Segment,ConvError> {
	let Self { x,y,.. } = *self;
	let seg = match (command,args) {
	    (Command::MoveRel,&[dx,dy]) | (Command::LineRel,&[dx,dy]) => {
		// A move is drawn as a line
		self.x += dx;
		self.y += dy;
		Segment::Relative { dx,dy }
	    },
	    (Command::HorizontalRel,&[dx]) => {
		self.x += dx;
		Segment::Relative { dx,dy:0.0 }
	    },
	    (Command::HorizontalAbs,&[x1]) => {
		self.x = x1;
		Segment::Absolute { x:x1,y }
	    },
	    (Command::VerticalRel,&[dy]) => {
		self.y += dy;
		Segment::Relative { dx:0.0,dy }
	    },
	    (Command::VerticalAbs,&[y1]) => {
		self.y = y1;
		Segment::Absolute { x,y:y1 }
	    },
	    (Command::CubicRel,&[dx1,dy1,dx2,dy2,dx,dy]) => {
		self.x += dx;
		self.y += dy;
		Segment::Curve {
		    c1:Point::new(x + dx1,y + dy1),
		    c2:Point::new(x + dx2,y + dy2),
		    dx,
		    dy
		}
	    },
	    (Command::SmoothCubicRel,&[dx2,dy2,dx,dy]) => {
		// The first control point mirrors this command's own second
		// control point, not the previous command's.
		self.x += dx;
		self.y += dy;
		Segment::Curve {
		    c1:Point::new(x - dx2,y - dy2),
		    c2:Point::new(x + dx2,y + dy2),
		    dx,
		    dy
		}
	    },
	    (Command::Close,&[]) => Segment::Cycle,
	    _ => return Err(ConvError::MalformedCommand {
		command:command.letter(),
		expected:command.arity(),
		found:args.len(),
		offset:self.offset
	    })
	};
	Ok(seg)
    }

    /// Interpret a whole command string.  Stops at the first close-path.
    pub fn run(&mut self,d:&str)->Result<(),ConvError> {
	let mut sc = Scanner::new(d);
	loop {
	    sc.skip_whitespace();
	    let c = match sc.peek() {
		Some(c) => c,
		None => break
	    };
	    if c.is_alphabetic() {
		self.command = Some(Command::try_from(c)?);
		sc.advance();
		sc.skip_whitespace();
	    }
	    let command = self.command
		.ok_or(ConvError::MissingCommand { offset:sc.pos() })?;

	    if command == Command::Close {
		self.segments.push(Segment::Cycle);
		break;
	    }

	    self.offset = sc.pos();
	    let args =
		if sc.is_done() {
		    Vec::new()
		} else {
		    sc.next_numbers(command.arity())?
		};
	    let seg = self.step(command,&args)?;
	    self.segments.push(seg);
	}
	Ok(())
    }
}

pub fn interpret(d:&str)->Result<Vec<Segment>,ConvError> {
    let mut interp = PathInterpreter::new();
    interp.run(d)?;
    Ok(interp.into_segments())
}
