use serde::Serialize;

/// One synthetic listing, serialized with the headers the analysis expects.
#[derive(Serialize)]
struct Listing {
    #[serde(rename = "Brand")]
    brand: &'static str,
    #[serde(rename = "Processor")]
    processor: &'static str,
    #[serde(rename = "RAM (GB)")]
    ram_gb: u32,
    #[serde(rename = "Storage")]
    storage: String,
    #[serde(rename = "GPU")]
    gpu: &'static str,
    #[serde(rename = "Screen Size (inch)")]
    screen_size_inch: f64,
    #[serde(rename = "Resolution")]
    resolution: &'static str,
    #[serde(rename = "Battery Life (hours)")]
    battery_life_hours: f64,
    #[serde(rename = "Weight (kg)")]
    weight_kg: f64,
    #[serde(rename = "Operating System")]
    operating_system: &'static str,
    #[serde(rename = "Price ($)")]
    price: f64,
}

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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Pick a uniformly random element.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    // (name, price premium)
    let brands = [
        ("Apple", 600.0),
        ("Razer", 500.0),
        ("MSI", 250.0),
        ("Dell", 150.0),
        ("HP", 100.0),
        ("Lenovo", 100.0),
        ("Asus", 80.0),
        ("Acer", 0.0),
        ("Chuwi", -150.0),
    ];
    let processors = [
        ("Intel i3", 0.0),
        ("Intel i5", 150.0),
        ("Intel i7", 400.0),
        ("Intel i9", 900.0),
        ("AMD Ryzen 5", 150.0),
        ("AMD Ryzen 7", 400.0),
        ("AMD Ryzen 9", 850.0),
    ];
    let gpus = [
        ("Integrated", 0.0),
        ("Nvidia GTX 1650", 250.0),
        ("Nvidia RTX 3060", 700.0),
        ("Nvidia RTX 4080", 1800.0),
        ("AMD Radeon RX 6600M", 600.0),
    ];
    let storages = [
        ("128GB eMMC", -100.0),
        ("256GB SSD", 0.0),
        ("512GB SSD", 100.0),
        ("1TB SSD", 250.0),
        ("2TB SSD", 600.0),
        ("1TB HDD", 50.0),
    ];
    let rams = [(4u32, 0.0), (8, 100.0), (16, 300.0), (32, 700.0), (64, 1400.0)];
    let screens = [(13.3, "1920x1080"), (14.0, "2560x1600"), (15.6, "1920x1080"), (16.0, "3840x2160"), (17.3, "2560x1440")];
    let systems = ["Windows", "macOS", "Linux", "FreeDOS", "Chrome OS"];

    let output_path = "laptop_prices.csv";
    let mut writer = csv::Writer::from_path(output_path)?;

    let n_rows = 1000;
    for _ in 0..n_rows {
        let &(brand, brand_premium) = rng.pick(&brands);
        let &(processor, cpu_premium) = rng.pick(&processors);
        let &(gpu, gpu_premium) = rng.pick(&gpus);
        let &(storage, storage_premium) = rng.pick(&storages);
        let &(ram_gb, ram_premium) = rng.pick(&rams);
        let &(screen, resolution) = rng.pick(&screens);
        let os = if brand == "Apple" { "macOS" } else { *rng.pick(&systems) };

        let base = 350.0 + brand_premium + cpu_premium + gpu_premium + storage_premium + ram_premium;
        let price = round2((base * rng.range(0.85, 1.25)).max(150.0));

        writer.serialize(Listing {
            brand,
            processor,
            ram_gb,
            storage: storage.to_string(),
            gpu,
            screen_size_inch: screen,
            resolution,
            battery_life_hours: round2(rng.range(4.0, 14.0)),
            weight_kg: round2(screen / 10.0 + rng.range(-0.3, 0.9)),
            operating_system: os,
            price,
        })?;
    }
    writer.flush()?;

    println!("Wrote {n_rows} listings to {output_path}");
    Ok(())
}
