use tracing::info;

use loomap_domain::input::NumberInput;

use crate::domain::repository::BathroomRepository;
use crate::error::ApiError;
use crate::usecase::bathroom::CreateBathroomInput;

struct SeedBathroom {
    building: &'static str,
    floor: i64,
    latitude: f64,
    longitude: f64,
    is_accessible: bool,
    gender: &'static str,
}

const NYU_BATHROOMS: [SeedBathroom; 10] = [
    SeedBathroom {
        building: "Kimmel Center",
        floor: 2,
        latitude: 40.7294,
        longitude: -73.9972,
        is_accessible: true,
        gender: "all",
    },
    SeedBathroom {
        building: "Bobst Library",
        floor: 1,
        latitude: 40.7295,
        longitude: -73.9975,
        is_accessible: true,
        gender: "all",
    },
    SeedBathroom {
        building: "Warren Weaver Hall",
        floor: 3,
        latitude: 40.7287,
        longitude: -73.9958,
        is_accessible: false,
        gender: "male",
    },
    SeedBathroom {
        building: "Warren Weaver Hall",
        floor: 3,
        latitude: 40.7287,
        longitude: -73.9958,
        is_accessible: false,
        gender: "female",
    },
    SeedBathroom {
        building: "Silver Center",
        floor: 1,
        latitude: 40.7308,
        longitude: -73.9954,
        is_accessible: true,
        gender: "all",
    },
    SeedBathroom {
        building: "Tisch Hall",
        floor: 2,
        latitude: 40.7291,
        longitude: -73.9954,
        is_accessible: true,
        gender: "all",
    },
    SeedBathroom {
        building: "Courant Institute",
        floor: 4,
        latitude: 40.7287,
        longitude: -73.9958,
        is_accessible: false,
        gender: "male",
    },
    SeedBathroom {
        building: "Courant Institute",
        floor: 4,
        latitude: 40.7287,
        longitude: -73.9958,
        is_accessible: false,
        gender: "female",
    },
    SeedBathroom {
        building: "Stern School of Business",
        floor: 1,
        latitude: 40.7291,
        longitude: -73.9984,
        is_accessible: true,
        gender: "all",
    },
    SeedBathroom {
        building: "Palladium Hall",
        floor: 2,
        latitude: 40.7327,
        longitude: -73.9921,
        is_accessible: true,
        gender: "all",
    },
];

// ── SeedBathrooms ────────────────────────────────────────────────────────────

pub struct SeedBathroomsUseCase<R: BathroomRepository> {
    pub repo: R,
}

impl<R: BathroomRepository> SeedBathroomsUseCase<R> {
    /// Insert the NYU campus bathrooms if the table is empty. Returns how many were inserted.
    pub async fn execute(&self) -> Result<usize, ApiError> {
        if self.repo.count().await? > 0 {
            info!("bathrooms already present, skipping seed");
            return Ok(0);
        }

        for seed in &NYU_BATHROOMS {
            let bathroom = CreateBathroomInput {
                building: Some(seed.building.to_owned()),
                floor: Some(NumberInput::Integer(seed.floor)),
                latitude: Some(NumberInput::Float(seed.latitude)),
                longitude: Some(NumberInput::Float(seed.longitude)),
                is_accessible: Some(seed.is_accessible),
                gender: Some(seed.gender.to_owned()),
                created_by: None,
            }
            .into_bathroom()?;
            self.repo.create(&bathroom).await?;
        }
        info!(count = NYU_BATHROOMS.len(), "seeded campus bathrooms");
        Ok(NYU_BATHROOMS.len())
    }
}
