use crate::detector::RowThreshold;

/// Modules in one digit
pub const DIGIT_MODULES: usize = 7;

/// Seven bar/space modules of one digit, `true` = bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModulePattern(pub [bool; DIGIT_MODULES]);

impl ModulePattern {
    /// Sample seven modules starting at pixel `start`.
    ///
    /// Each module is probed at 1/4, 1/2 and 3/4 of its span and is a bar
    /// when at least two probes fall at or below the cut. Probes past the
    /// row end count as space.
    pub fn sample(row: &[u8], start: usize, module_width: usize, threshold: &RowThreshold) -> Self {
        let mut modules = [false; DIGIT_MODULES];
        for (m, module) in modules.iter_mut().enumerate() {
            let base = start + m * module_width;
            let votes = (1..=3)
                .map(|q| base + module_width * q / 4)
                .filter(|&px| px < row.len() && threshold.is_bar(row[px]))
                .count();
            *module = votes >= 2;
        }
        ModulePattern(modules)
    }

    /// Pattern of a table code, most significant bit first
    pub fn from_code(code: u8) -> Self {
        let mut modules = [false; DIGIT_MODULES];
        for (i, module) in modules.iter_mut().enumerate() {
            *module = (code >> (DIGIT_MODULES - 1 - i)) & 1 == 1;
        }
        ModulePattern(modules)
    }

    /// Pack into a 7-bit code, first module in the high bit
    pub fn code(&self) -> u8 {
        self.0
            .iter()
            .fold(0u8, |acc, &bar| (acc << 1) | bar as u8)
    }
}
