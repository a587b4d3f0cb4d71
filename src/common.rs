pub use std::error::Error;
use std::fmt;

pub type Res<T> = Result<T,Box<dyn Error>>;

#[derive(Debug)]
struct SimpleError(String);

impl fmt::Display for SimpleError {
    fn fmt(&self,f:&mut fmt::Formatter<'_>)->fmt::Result {
	write!(f,"{}",self.0)
    }
}

impl Error for SimpleError { }

pub fn error(msg:&str)->Box<dyn Error> {
    Box::new(SimpleError(msg.to_string()))
}

/// Conversion failures.  All of them are deterministic functions of the
/// input, nothing here is worth retrying.
#[derive(Debug,Clone,PartialEq)]
pub enum ConvError {
    /// Captured text of a numeric literal is not a float.
    MalformedNumber {
	text:String,
	start:usize,
	end:usize
    },
    /// The command string ended before the command got all its arguments.
    MalformedCommand {
	command:char,
	expected:usize,
	found:usize,
	offset:usize
    },
    /// Numbers appear before any command letter.
    MissingCommand {
	offset:usize
    },
    UnsupportedCommand(char),
    MissingAttribute {
	element:String,
	name:String
    },
    BadViewBox(String)
}

impl fmt::Display for ConvError {
    fn fmt(&self,f:&mut fmt::Formatter<'_>)->fmt::Result {
	match self {
	    ConvError::MalformedNumber { text,start,end } =>
		write!(f,"invalid number: {:?}, start={}, end={}",text,start,end),
	    ConvError::MalformedCommand { command,expected,found,offset } =>
		write!(f,"command {:?} needs {} numbers, found {} (at offset {})",
		       command,expected,found,offset),
	    ConvError::MissingCommand { offset } =>
		write!(f,"number without a preceding command letter at offset {}",offset),
	    ConvError::UnsupportedCommand(c) =>
		write!(f,"unsupported path command: {:?}",c),
	    ConvError::MissingAttribute { element,name } =>
		write!(f,"<{}> has no {:?} attribute",element,name),
	    ConvError::BadViewBox(u) =>
		write!(f,"viewBox must hold four numbers, got {:?}",u)
	}
    }
}

impl Error for ConvError { }
