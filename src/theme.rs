pub struct Glyphs {
  pub bar:  char,
  pub zero: char,
  pub tick: char,
  pub line: char,
}

pub const UNICODE: Glyphs = Glyphs::new('░', '▓');

/// For terminals and files that can't take anything but ASCII.
pub const ASCII: Glyphs = Glyphs::new(':', '|');

impl Glyphs {
  pub const fn new(bar: char, zero: char) -> Self { Glyphs { bar, zero, tick: '+', line: '-' } }
}
