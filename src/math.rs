#![allow(dead_code)]
#![allow(unused_macros)]
#![macro_use]

pub type Real = f64;

pub fn close_enough(x:f64,y:f64,tol:f64)->bool {
    let ax = x.abs();
    let ay = y.abs();
    let a = if ax>ay { ax } else { ay };
    let e = (x-y).abs();
    let e = if a > tol { e/a } else { e };
    e < tol
}

macro_rules! assert_close {
    ($x:expr,$y:expr,$tol:expr) => {
        if !close_enough($x,$y,$tol) {
            println!("Tolerance failure: |{:.6e} - {:.6e}| @ {:.6e}",$x,$y,$tol);
            panic!("Tolerance failure");
        }
    }
}

fn strip_zeros(u:&str)->&str {
    if u.contains('.') {
	u.trim_end_matches('0').trim_end_matches('.')
    } else {
	u
    }
}

/// Format like C's `%.{prec}g`: `prec` significant digits, scientific
/// notation when the decimal exponent is below -4 or at least `prec`,
/// trailing zeros removed.
pub fn fmt_g(x:Real,prec:usize)->String {
    let prec = prec.max(1);
    if x.is_nan() {
	return "nan".to_string();
    }
    if x.is_infinite() {
	return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
	return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Exponent after rounding to prec digits
    let sci = format!("{:.*e}",prec - 1,x);
    let (mant,exp) = sci.split_once('e').unwrap_or((sci.as_str(),"0"));
    let exp : i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= prec as i32 {
	format!("{}e{}{:02}",
		strip_zeros(mant),
		if exp < 0 { '-' } else { '+' },
		exp.abs())
    } else {
	let decimals = (prec as i32 - 1 - exp).max(0) as usize;
	let fixed = format!("{:.*}",decimals,x);
	strip_zeros(&fixed).to_string()
    }
}

/// Fixed-point with `decimals` digits, as `%.{decimals}f`.
pub fn fmt_f(x:Real,decimals:usize)->String {
    format!("{:.*}",decimals,x)
}

#[cfg(test)]
#[test]
fn test_fmt_g() {
    assert_eq!(fmt_g(10.0,5),"10");
    assert_eq!(fmt_g(-12.5,5),"-12.5");
    assert_eq!(fmt_g(0.5,5),"0.5");
    assert_eq!(fmt_g(1.0/3.0,5),"0.33333");
    assert_eq!(fmt_g(12345.6,5),"12346");
    assert_eq!(fmt_g(123456.0,5),"1.2346e+05");
    assert_eq!(fmt_g(0.0001,5),"0.0001");
    assert_eq!(fmt_g(0.00001,5),"1e-05");
    assert_eq!(fmt_g(-0.0,5),"-0");
    assert_eq!(fmt_g(0.0,5),"0");
}

#[cfg(test)]
#[test]
fn test_fmt_f() {
    assert_eq!(fmt_f(100.0,3),"100.000");
    assert_eq!(fmt_f(2.0/3.0,3),"0.667");
    assert!(close_enough(fmt_f(1.23456,3).parse().unwrap(),1.235,1e-9));
}
