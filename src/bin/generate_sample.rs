use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Course-schedule table for the text-annotation features: Number stays a
/// string (leading zeros matter), a few rows have no meeting days.
fn write_schedule() -> Result<()> {
    let rows: &[(&str, &str, &str, &str)] = &[
        ("0150", "Intro Economics", "TuTh", "9:00AM - 10:15AM"),
        ("1110", "Microeconomics", "MWF", "10:00AM - 10:50AM"),
        ("1120", "Macroeconomics", "MWF", "11:00AM - 11:50AM"),
        ("2200", "Statistics", "TuTh", "1:00PM - 2:15PM"),
        ("2250", "Game Theory", "", "3:00PM - 4:15PM"),
        ("3305", "Econometrics", "MWF", "1:00PM - 1:50PM"),
        ("3340", "Labor Economics", "TuTh", "11:00AM - 12:15PM"),
        ("3360", "Public Finance", "", ""),
        ("4420", "Advanced Theory", "Th", "4:00PM - 6:30PM"),
        ("4455", "Urban Economics", "MW", "2:00PM - 3:15PM"),
        ("5500", "Research Seminar", "F", "9:00AM - 11:30AM"),
        ("6605", "PhD Econometrics", "TuTh", "10:30AM - 11:45AM"),
    ];

    let mut writer = csv::Writer::from_path("schedule.csv").context("creating schedule.csv")?;
    writer.write_record(["Number", "Name", "Days", "Time"])?;
    for (number, name, days, time) in rows {
        writer.write_record([number, name, days, time])?;
    }
    writer.flush()?;
    println!("Wrote {} courses to schedule.csv", rows.len());
    Ok(())
}

/// Household income / effective-tax-rate table for the numeric charts.
fn write_households(rng: &mut SimpleRng) -> Result<()> {
    let mut writer = csv::Writer::from_path("households.csv").context("creating households.csv")?;
    writer.write_record(["inc", "etr", "type"])?;

    let n = 400;
    for i in 0..n {
        let household_type = i % 4 + 1;
        let inc = (rng.gauss(10.8, 0.6)).exp();

        // Higher types face higher base rates; rate rises gently with income.
        let base = 0.05 * household_type as f64;
        let etr = (base + 0.015 * (inc / 20_000.0).ln() + rng.gauss(0.0, 0.02))
            .clamp(0.0, 0.6);

        writer.write_record([
            format!("{inc:.2}"),
            format!("{etr:.4}"),
            household_type.to_string(),
        ])?;
    }
    writer.flush()?;
    println!("Wrote {n} households to households.csv");
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    write_schedule()?;
    write_households(&mut rng)?;
    Ok(())
}
