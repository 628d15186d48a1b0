//! Write a deterministic synthetic `cleaned.csv` for demos.

use gradpay::data::model::Metric;

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

fn cell(value: f64, rng: &mut SimpleRng) -> String {
    // Roughly 3% of cells are unreported, as in the published survey.
    if rng.next_f64() < 0.03 {
        "na".to_string()
    } else {
        format!("{value:.1}")
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (university, school, degree, starting salary, yearly growth)
    let cohorts = [
        ("National University of Singapore", "School of Computing", "Bachelor of Computing (Computer Science)", 4200.0, 180.0),
        ("National University of Singapore", "Faculty of Law", "Bachelor of Laws", 4800.0, 110.0),
        ("Nanyang Technological University", "College of Engineering", "Mechanical Engineering", 3400.0, 90.0),
        ("Nanyang Technological University", "Nanyang Business School", "Accountancy", 3200.0, 70.0),
        ("Singapore Management University", "School of Economics", "Bachelor of Science (Economics)", 3900.0, 120.0),
        ("Singapore Management University", "School of Accountancy", "Bachelor of Accountancy", 3500.0, 60.0),
        ("Singapore University of Technology and Design", "Pillar", "Architecture and Sustainable Design", 3600.0, 85.0),
        ("Singapore Institute of Technology", "SIT", "Hospitality Business", 2700.0, 40.0),
    ];

    let output_path = "cleaned.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    let mut header = vec!["year", "university", "school", "degree"];
    header.extend(Metric::ALL.iter().map(|m| m.column()));
    writer.write_record(&header).expect("Failed to write header");

    let mut rows = 0;
    for &(university, school, degree, start, growth) in &cohorts {
        // Younger programmes have shorter histories.
        let first_year = 2013 + (rng.next_u64() % 6) as i32;
        for year in first_year..=2023 {
            let t = (year - 2013) as f64;
            let median = start + growth * t + rng.gauss(0.0, 120.0);
            let mean = median + rng.gauss(150.0, 60.0);
            let basic_median = median * 0.93;
            let basic_mean = mean * 0.93;
            let p25 = median * 0.85;
            let p75 = median * 1.2;
            let overall = (92.0 + rng.gauss(0.0, 3.0) + (median - 3500.0) / 400.0).min(100.0);
            let ft_perm = (overall - 8.0 + rng.gauss(0.0, 2.0)).min(overall);

            let mut record = vec![
                year.to_string(),
                university.to_string(),
                school.to_string(),
                degree.to_string(),
            ];
            for value in [overall, ft_perm, basic_mean, basic_median, mean, median, p25, p75] {
                record.push(cell(value, &mut rng));
            }
            writer.write_record(&record).expect("Failed to write row");
            rows += 1;
        }
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {rows} survey rows for {} cohorts to {output_path}", cohorts.len());
}
