use rand::Rng;

use super::vitals::{drift, perturb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpendableStatus {
    Active,
    Terminated,
}

impl ExpendableStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ExpendableStatus::Active => "Active",
            ExpendableStatus::Terminated => "TERMINATED",
        }
    }
}

/// How strongly each vital moves per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volatility {
    pub health: f64,
    pub energy: f64,
    pub memory: f64,
    pub temperature: f64,
}

/// A printed, disposable colony worker.
#[derive(Debug, Clone)]
pub struct Expendable {
    pub id: u32,
    pub name: String,
    pub status: ExpendableStatus,
    pub health: f64,
    pub energy: f64,
    pub memory: f64,
    /// Internal body temperature as a percentage of normal.
    pub temperature: f64,
    pub location: String,
    pub last_mission: String,
    pub notes: String,
    pub print_date: String,
    pub volatility: Volatility,
    /// Set while any vital sits in the critical band.
    pub warning_state: bool,
}

/// Which vital tripped the warning band, checked in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriticalVital {
    Health,
    Energy,
    Memory,
}

impl Expendable {
    /// Mickey #7: back from the crevasse and behaving oddly.
    pub fn seven() -> Self {
        Expendable {
            id: 7,
            name: "Mickey Barnes #7".to_string(),
            status: ExpendableStatus::Active,
            health: 87.0,
            energy: 65.0,
            memory: 92.0,
            temperature: 72.0,
            location: "Sector 4-B".to_string(),
            last_mission: "Creeper reconnaissance".to_string(),
            notes: "Survived unexpected encounter with Creeper hive. Possible contamination \
                    being monitored. Shows unusual cognitive patterns."
                .to_string(),
            print_date: "2054-03-17".to_string(),
            volatility: Volatility {
                health: 2.0,
                energy: 2.0,
                memory: 2.0,
                temperature: 1.0,
            },
            warning_state: false,
        }
    }

    /// Mickey #8: freshly printed, by the book.
    pub fn eight() -> Self {
        Expendable {
            id: 8,
            name: "Mickey Barnes #8".to_string(),
            status: ExpendableStatus::Active,
            health: 100.0,
            energy: 95.0,
            memory: 98.0,
            temperature: 60.0,
            location: "Colony Hub".to_string(),
            last_mission: "None (Recently printed)".to_string(),
            notes: "Printed after Mickey #7 was presumed dead. Shows optimal baseline readings. \
                    Mental conditioning complete with standard protocols."
                .to_string(),
            print_date: "2054-05-12".to_string(),
            volatility: Volatility {
                health: 0.5,
                energy: 1.0,
                memory: 0.1,
                temperature: 1.0,
            },
            warning_state: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ExpendableStatus::Active
    }

    /// One vitals tick. Terminated expendables do not change.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !self.is_active() {
            return;
        }
        let v = self.volatility;
        self.health = drift(self.health, v.health, rng);
        self.energy = perturb(self.energy, 3.0, 1.5, v.energy, rng);
        // memory leans downward
        self.memory = perturb(self.memory, 1.0, 0.6, v.memory, rng);
        self.temperature = drift(self.temperature, v.temperature, rng);
    }

    /// First vital in the critical band, if any.
    pub fn critical_vital(&self) -> Option<CriticalVital> {
        if self.health < 30.0 {
            Some(CriticalVital::Health)
        } else if self.energy < 20.0 {
            Some(CriticalVital::Energy)
        } else if self.memory < 40.0 {
            Some(CriticalVital::Memory)
        } else {
            None
        }
    }

    /// Temperature mapped onto the -60..-10 °C suit range.
    pub fn temperature_celsius(&self) -> f64 {
        -60.0 + self.temperature * 0.5
    }

    /// Irreversible. Returns false if already terminated.
    pub fn terminate(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.status = ExpendableStatus::Terminated;
        self.health = 0.0;
        self.energy = 0.0;
        self.memory = 0.0;
        self.temperature = 0.0;
        self.warning_state = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn seven_is_more_volatile_than_eight() {
        let seven = Expendable::seven();
        let eight = Expendable::eight();
        assert!(seven.volatility.health > eight.volatility.health);
        assert!(seven.volatility.energy > eight.volatility.energy);
        assert!(seven.volatility.memory > eight.volatility.memory);
    }

    #[test]
    fn tick_moves_active_expendable() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut e = Expendable::seven();
        let before = (e.health, e.energy, e.memory, e.temperature);
        e.tick(&mut rng);
        assert_ne!(before, (e.health, e.energy, e.memory, e.temperature));
    }

    #[test]
    fn terminated_expendable_is_frozen() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut e = Expendable::eight();
        assert!(e.terminate());
        e.tick(&mut rng);
        assert_eq!(e.health, 0.0);
        assert_eq!(e.status, ExpendableStatus::Terminated);
    }

    #[test]
    fn terminate_twice_is_rejected() {
        let mut e = Expendable::seven();
        assert!(e.terminate());
        assert!(!e.terminate());
        assert!(!e.is_active());
    }

    #[test]
    fn critical_vital_checks_health_first() {
        let mut e = Expendable::seven();
        assert_eq!(e.critical_vital(), None);
        e.memory = 10.0;
        assert_eq!(e.critical_vital(), Some(CriticalVital::Memory));
        e.energy = 10.0;
        assert_eq!(e.critical_vital(), Some(CriticalVital::Energy));
        e.health = 10.0;
        assert_eq!(e.critical_vital(), Some(CriticalVital::Health));
    }

    #[test]
    fn temperature_maps_to_celsius() {
        let mut e = Expendable::seven();
        e.temperature = 0.0;
        assert_eq!(e.temperature_celsius(), -60.0);
        e.temperature = 100.0;
        assert_eq!(e.temperature_celsius(), -10.0);
    }
}
