/// Vehicle model
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vehicle {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub year: i32,
}

impl Vehicle {
    /// Replace every mutable field, keeping the id.
    pub fn apply(&mut self, changes: NewVehicle) {
        self.brand = changes.brand;
        self.model = changes.model;
        self.year = changes.year;
    }
}

/// Vehicle fields without an id, used for create and full update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewVehicle {
    pub brand: String,
    pub model: String,
    pub year: i32,
}

impl NewVehicle {
    pub fn new(brand: impl Into<String>, model: impl Into<String>, year: i32) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            year,
        }
    }
}
