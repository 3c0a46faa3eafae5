use std::error::Error;

use ecotrip::{Calculation, CalculationError, Calculator, EmissionModel, RouteTable, TripRequest};

fn request(origin: &str, destination: &str, mode: &str, passengers: u32) -> TripRequest {
    TripRequest {
        origin: origin.to_string(),
        destination: destination.to_string(),
        mode: mode.to_string(),
        passengers,
    }
}

/// A single traveller driving a petrol car from Rio de Janeiro to São Paulo
#[test]
fn acceptance_car_rio_sao_paulo() -> Result<(), Box<dyn Error>> {
    let routes = RouteTable::embedded()?;
    let model = EmissionModel::embedded()?;
    let calculator = Calculator::new(&routes, &model);

    let result = calculator.perform_full_calculation(&request(
        "Rio de Janeiro",
        "São Paulo",
        "carro_gasolina",
        1,
    ))?;

    assert_eq!(
        result,
        Calculation {
            distance: 430.0,
            emission: 82.56,
            emission_per_passenger: 82.56,
            trees_needed: 1,
        }
    );
    Ok(())
}

/// Four travellers flying from São Paulo to Manaus.
/// 3.672 t * 6 trees/t = 22.032 trees, rounded up to 23
#[test]
fn acceptance_plane_sao_paulo_manaus() -> Result<(), Box<dyn Error>> {
    let routes = RouteTable::embedded()?;
    let model = EmissionModel::embedded()?;
    let calculator = Calculator::new(&routes, &model);

    let result =
        calculator.perform_full_calculation(&request("São Paulo", "Manaus", "aviao", 4))?;

    assert_eq!(
        result,
        Calculation {
            distance: 3600.0,
            emission: 3672.0,
            emission_per_passenger: 918.0,
            trees_needed: 23,
        }
    );
    Ok(())
}

/// The order of the cities does not change the result
#[test]
fn acceptance_reverse_trip() -> Result<(), Box<dyn Error>> {
    let routes = RouteTable::embedded()?;
    let model = EmissionModel::embedded()?;
    let calculator = Calculator::new(&routes, &model);

    for a in routes.cities() {
        for b in routes.cities().iter().filter(|b| *b != a) {
            assert_eq!(
                calculator.perform_full_calculation(&request(a, b, "trem", 2))?,
                calculator.perform_full_calculation(&request(b, a, "trem", 2))?
            );
        }
    }
    Ok(())
}

#[test]
fn acceptance_same_city() -> Result<(), Box<dyn Error>> {
    let routes = RouteTable::embedded()?;
    let model = EmissionModel::embedded()?;
    let calculator = Calculator::new(&routes, &model);

    assert_eq!(
        calculator.perform_full_calculation(&request("Curitiba", "Curitiba", "onibus", 1)),
        Err(CalculationError::DegenerateRoute("Curitiba".to_string()))
    );
    // the lookup itself reports a zero distance
    assert_eq!(calculator.get_distance("Curitiba", "Curitiba"), Some(0.0));
    Ok(())
}

#[test]
fn acceptance_unknown_mode() -> Result<(), Box<dyn Error>> {
    let routes = RouteTable::embedded()?;
    let model = EmissionModel::embedded()?;
    let calculator = Calculator::new(&routes, &model);

    let distance = calculator
        .get_distance("Fortaleza", "Porto Alegre")
        .ok_or("route not found")?;
    assert_eq!(distance, 3700.0);

    let emission = calculator.calculate_emission(distance, "bicicleta", 1);
    assert_eq!(
        emission,
        Err(CalculationError::UnknownTransportMode("bicicleta".to_string()))
    );
    assert_eq!(emission.unwrap_or_default(), 0.0);

    assert_eq!(
        calculator.perform_full_calculation(&request("Fortaleza", "Porto Alegre", "bicicleta", 1)),
        Err(CalculationError::UnknownTransportMode("bicicleta".to_string()))
    );
    Ok(())
}

/// Tables read from disk replace the embedded ones
#[test]
fn acceptance_tables_from_disk() -> Result<(), Box<dyn Error>> {
    let dir = std::env::temp_dir().join(format!("ecotrip-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let cities = dir.join("cities.csv");
    let distances = dir.join("distances.csv");
    let factors = dir.join("factors.csv");
    let loaded = (|| -> Result<(RouteTable, EmissionModel), Box<dyn Error>> {
        std::fs::write(&cities, "name\nLisboa\nPorto\nFaro\n")?;
        std::fs::write(&distances, "from,to,km\nPorto,Lisboa,313\nFaro,Lisboa,278.9\n")?;
        std::fs::write(&factors, "mode,name,kg_co2_per_km\ncomboio,Comboio,0.03\n")?;
        Ok((
            RouteTable::load(&cities, &distances)?,
            EmissionModel::load(&factors, 6.0)?,
        ))
    })();
    // cleaned up before any assertion
    std::fs::remove_dir_all(&dir)?;
    let (routes, model) = loaded?;
    let calculator = Calculator::new(&routes, &model);

    assert_eq!(
        calculator.perform_full_calculation(&request("Lisboa", "Porto", "comboio", 2))?,
        Calculation {
            distance: 313.0,
            emission: 18.78,
            emission_per_passenger: 9.39,
            trees_needed: 1,
        }
    );
    // 25.101 kg in total, 25.10 / 3 per passenger
    assert_eq!(
        calculator.perform_full_calculation(&request("Lisboa", "Faro", "comboio", 3))?,
        Calculation {
            distance: 278.9,
            emission: 25.1,
            emission_per_passenger: 8.37,
            trees_needed: 1,
        }
    );
    assert!(matches!(
        calculator.perform_full_calculation(&request("Porto", "Faro", "comboio", 1)),
        Err(CalculationError::UnknownRoute { .. })
    ));
    Ok(())
}
