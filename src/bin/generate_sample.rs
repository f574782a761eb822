use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use pitch_arsenal::config::SeasonConfig;

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

    /// Pick an index from unnormalised weights.
    fn weighted(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut r = self.next_f64() * total;
        for (i, w) in weights.iter().enumerate() {
            if r < *w {
                return i;
            }
            r -= w;
        }
        weights.len() - 1
    }
}

/// One pitch in an arsenal: code, velo (mph), pfx_x / pfx_z (ft), usage
/// weight in the first and third time through the order.
struct ArsenalPitch {
    code: &'static str,
    velo: f64,
    pfx_x: f64,
    pfx_z: f64,
    weight_first: f64,
    weight_third: f64,
}

fn pitch(
    code: &'static str,
    velo: f64,
    pfx_x: f64,
    pfx_z: f64,
    weight_first: f64,
    weight_third: f64,
) -> ArsenalPitch {
    ArsenalPitch {
        code,
        velo,
        pfx_x,
        pfx_z,
        weight_first,
        weight_third,
    }
}

struct Pitcher {
    name: &'static str,
    /// Deepest time through the order reached in a typical start.
    max_pass: i64,
    pitches_per_pass: usize,
    arsenal: Vec<ArsenalPitch>,
}

#[derive(Default)]
struct Columns {
    player_name: Vec<String>,
    pitch_type: Vec<Option<String>>,
    n_thruorder_pitcher: Vec<i64>,
    release_speed: Vec<Option<f64>>,
    pfx_x: Vec<Option<f64>>,
    pfx_z: Vec<Option<f64>>,
    delta_pitcher_run_exp: Vec<Option<f64>>,
    game_pk: Vec<i64>,
}

impl Columns {
    fn len(&self) -> usize {
        self.player_name.len()
    }

    fn push(
        &mut self,
        name: &str,
        pitch_type: Option<&str>,
        pass: i64,
        measures: [Option<f64>; 4],
        game: i64,
    ) {
        let [speed, x, z, rv] = measures;
        self.player_name.push(name.to_string());
        self.pitch_type.push(pitch_type.map(str::to_string));
        self.n_thruorder_pitcher.push(pass);
        self.release_speed.push(speed);
        self.pfx_x.push(x);
        self.pfx_z.push(z);
        self.delta_pitcher_run_exp.push(rv);
        self.game_pk.push(game);
    }

    fn batch(&self, schema: Arc<Schema>, range: std::ops::Range<usize>) -> RecordBatch {
        let strings = |v: &[String]| StringArray::from_iter_values(v[range.clone()].iter());
        let opt_strings = |v: &[Option<String>]| {
            StringArray::from_iter(v[range.clone()].iter().map(|s| s.as_deref()))
        };
        let floats = |v: &[Option<f64>]| Float64Array::from(v[range.clone()].to_vec());
        let ints = |v: &[i64]| Int64Array::from(v[range.clone()].to_vec());

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(strings(&self.player_name)),
                Arc::new(opt_strings(&self.pitch_type)),
                Arc::new(ints(&self.n_thruorder_pitcher)),
                Arc::new(floats(&self.release_speed)),
                Arc::new(floats(&self.pfx_x)),
                Arc::new(floats(&self.pfx_z)),
                Arc::new(floats(&self.delta_pitcher_run_exp)),
                Arc::new(ints(&self.game_pk)),
            ],
        )
        .expect("Failed to create RecordBatch")
    }
}

fn roster() -> Vec<Pitcher> {
    vec![
        Pitcher {
            name: "Alvarez, Ruben",
            max_pass: 3,
            pitches_per_pass: 32,
            arsenal: vec![
                pitch("FF", 96.1, -0.55, 1.35, 0.50, 0.38),
                pitch("SL", 86.4, 0.42, 0.12, 0.28, 0.30),
                pitch("CH", 87.9, -1.20, 0.55, 0.22, 0.32),
            ],
        },
        Pitcher {
            name: "Brennan, Cole",
            max_pass: 3,
            pitches_per_pass: 30,
            arsenal: vec![
                pitch("SI", 93.5, -1.35, 0.70, 0.45, 0.35),
                pitch("FC", 89.8, 0.25, 0.60, 0.20, 0.25),
                pitch("ST", 81.7, 1.15, -0.05, 0.25, 0.20),
                pitch("CH", 85.0, -1.30, 0.30, 0.10, 0.20),
            ],
        },
        Pitcher {
            name: "Castillo, Mateo",
            max_pass: 3,
            pitches_per_pass: 34,
            arsenal: vec![
                pitch("FF", 94.2, -0.70, 1.25, 0.42, 0.36),
                pitch("CU", 78.9, 0.75, -1.05, 0.18, 0.26),
                pitch("SL", 85.1, 0.35, 0.20, 0.25, 0.20),
                pitch("FS", 86.6, -0.95, 0.15, 0.15, 0.18),
            ],
        },
        Pitcher {
            name: "Dorsey, Quinn",
            max_pass: 2,
            pitches_per_pass: 18,
            arsenal: vec![
                pitch("FF", 97.8, -0.40, 1.45, 0.60, 0.55),
                pitch("SL", 88.0, 0.30, 0.25, 0.40, 0.45),
            ],
        },
        // Short reliever: never sees a lineup twice, so the row filter drops this pitcher.
        Pitcher {
            name: "Ellison, Jake",
            max_pass: 1,
            pitches_per_pass: 16,
            arsenal: vec![
                pitch("FF", 98.4, -0.50, 1.40, 0.55, 0.55),
                pitch("SV", 83.0, 1.35, -0.35, 0.45, 0.45),
            ],
        },
    ]
}

fn main() {
    let mut rng = SimpleRng::new(2024);
    let season = SeasonConfig::default();
    let starts: i64 = 24;

    let mut cols = Columns::default();
    for game in 0..starts {
        let game_pk = 745_000 + game;
        for pitcher in roster() {
            // Anyone past one pass occasionally goes one deeper than usual.
            let deepest = if pitcher.max_pass > 1 && rng.next_f64() < 0.15 {
                pitcher.max_pass + 1
            } else {
                pitcher.max_pass
            };
            for pass in 1..=deepest {
                let t = ((pass - 1) as f64 / 2.0).min(1.0);
                let weights: Vec<f64> = pitcher
                    .arsenal
                    .iter()
                    .map(|p| p.weight_first + (p.weight_third - p.weight_first) * t)
                    .collect();
                for _ in 0..pitcher.pitches_per_pass {
                    let p = &pitcher.arsenal[rng.weighted(&weights)];
                    // Velocity fades a little each time through.
                    let velo = rng.gauss(p.velo - 0.4 * (pass - 1) as f64, 0.8);
                    let x = rng.gauss(p.pfx_x, 0.08);
                    let z = rng.gauss(p.pfx_z, 0.08);
                    let rv = rng.gauss(0.004 - 0.006 * (pass - 1) as f64, 0.12);

                    let roll = rng.next_f64();
                    let code = if roll < 0.004 {
                        Some("PO")
                    } else if roll < 0.008 {
                        Some("None")
                    } else if roll < 0.012 {
                        None
                    } else {
                        Some(p.code)
                    };
                    let speed = (rng.next_f64() > 0.003).then_some(velo);
                    cols.push(
                        pitcher.name,
                        code,
                        pass,
                        [speed, Some(x), Some(z), Some(rv)],
                        game_pk,
                    );
                }
            }
        }
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("player_name", DataType::Utf8, false),
        Field::new("pitch_type", DataType::Utf8, true),
        Field::new("n_thruorder_pitcher", DataType::Int64, false),
        Field::new("release_speed", DataType::Float64, true),
        Field::new("pfx_x", DataType::Float64, true),
        Field::new("pfx_z", DataType::Float64, true),
        Field::new("delta_pitcher_run_exp", DataType::Float64, true),
        Field::new("game_pk", DataType::Int64, false),
    ]));

    // Split the season into equal consecutive partitions.
    let n = cols.len();
    let parts = season.partition_files.len();
    for (i, name) in season.partition_files.iter().enumerate() {
        let start = n * i / parts;
        let end = n * (i + 1) / parts;
        let batch = cols.batch(schema.clone(), start..end);

        let file = std::fs::File::create(name).expect("Failed to create output file");
        let mut writer =
            ArrowWriter::try_new(file, schema.clone(), None).expect("Failed to create writer");
        writer.write(&batch).expect("Failed to write batch");
        writer.close().expect("Failed to close writer");

        println!("Wrote {} pitches to {name}", end - start);
    }
}
