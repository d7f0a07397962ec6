use rand::Rng;

pub const DEFAULT_DIE_SIDES: u32 = 6;

#[derive(Debug, Clone, Copy)]
pub struct Dice {
    default_sides: u32,
}

impl Dice {
    /// Dice falling back to `default_sides`, or 6 if that is not configured.
    pub fn new(default_sides: Option<u32>) -> Self {
        Self {
            default_sides: default_sides
                .filter(|&sides| sides > 0)
                .unwrap_or(DEFAULT_DIE_SIDES),
        }
    }

    /// Number of sides named by the `[sides]` argument.
    /// Missing, non-numeric or zero values fall back to the default.
    pub fn sides(&self, arg: Option<&str>) -> u32 {
        arg.and_then(|arg| arg.trim().parse::<u32>().ok())
            .filter(|&sides| sides > 0)
            .unwrap_or(self.default_sides)
    }

    pub fn roll(&self, arg: Option<&str>) -> u32 {
        self.roll_with(arg, &mut rand::thread_rng())
    }

    pub fn roll_with(&self, arg: Option<&str>, rng: &mut impl Rng) -> u32 {
        rng.gen_range(1..=self.sides(arg))
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::new(None)
    }
}
