use rand::Rng;

use super::vitals::drift;

/// The colony's surface-to-orbit vessel.
#[derive(Debug, Clone)]
pub struct Ship {
    pub name: String,
    pub status: String,
    pub location: String,
    pub last_mission: String,
    pub hull: f64,
    pub fuel: f64,
    pub life_support: f64,
    pub engine: f64,
    pub notes: String,
}

/// Per-field volatility: hull, fuel, life support, engine.
const SHIP_VOLATILITY: [f64; 4] = [0.5, 0.3, 0.2, 0.4];

impl Default for Ship {
    fn default() -> Self {
        Self::heimdall()
    }
}

impl Ship {
    pub fn heimdall() -> Self {
        Ship {
            name: "NSS Heimdall".to_string(),
            status: "docked".to_string(),
            location: "Bay 2-A".to_string(),
            last_mission: "Supply Run".to_string(),
            hull: 92.0,
            fuel: 78.0,
            life_support: 95.0,
            engine: 88.0,
            notes: "Minor hull damage from ice storm during last landing. Scheduled for \
                    repair during next maintenance cycle."
                .to_string(),
        }
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let [hull, fuel, life_support, engine] = SHIP_VOLATILITY;
        self.hull = drift(self.hull, hull, rng);
        self.fuel = drift(self.fuel, fuel, rng);
        self.life_support = drift(self.life_support, life_support, rng);
        self.engine = drift(self.engine, engine, rng);
    }

    /// (label, value) pairs in dashboard order.
    pub fn vitals(&self) -> [(&'static str, f64); 4] {
        [
            ("Hull integrity", self.hull),
            ("Fuel systems", self.fuel),
            ("Life support", self.life_support),
            ("Engine status", self.engine),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ticks_stay_close_to_start() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut ship = Ship::heimdall();
        ship.tick(&mut rng);
        assert!((ship.hull - 92.0).abs() <= 0.5);
        assert!((ship.fuel - 78.0).abs() <= 0.3);
        assert!((ship.life_support - 95.0).abs() <= 0.2);
        assert!((ship.engine - 88.0).abs() <= 0.4);
    }

    #[test]
    fn vitals_are_in_dashboard_order() {
        let ship = Ship::heimdall();
        let labels: Vec<&str> = ship.vitals().iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            vec!["Hull integrity", "Fuel systems", "Life support", "Engine status"]
        );
    }
}
