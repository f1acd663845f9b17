// The fixed catalog of Open-Meteo tools
//
// Each entry ties a tool name to its argument schema and remote operation,
// so the advertised schema, the validator and the route cannot drift apart.

use crate::schema::{CrossFieldRule, FieldKind, FieldSpec, ParameterSchema};
use crate::tools::weather::{Operation, WeatherTool};
use crate::tools::ToolRegistry;
use open_meteo_client::api::ForecastModel;
use open_meteo_client::OpenMeteoClient;
use std::sync::Arc;

/// Maximum number of coordinates per elevation request.
pub const MAX_ELEVATION_COORDINATES: usize = 100;

pub const TEMPERATURE_UNITS: &[&str] = &["celsius", "fahrenheit"];
pub const WIND_SPEED_UNITS: &[&str] = &["kmh", "ms", "mph", "kn"];
pub const PRECIPITATION_UNITS: &[&str] = &["mm", "inch"];
pub const LENGTH_UNITS: &[&str] = &["metric", "imperial"];
pub const TIME_FORMATS: &[&str] = &["iso8601", "unixtime"];
pub const AIR_QUALITY_DOMAINS: &[&str] = &["auto", "cams_europe", "cams_global"];
pub const CELL_SELECTIONS: &[&str] = &["land", "sea", "nearest"];

pub struct OperationSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: ParameterSchema,
    pub operation: Operation,
}

/// Every operation, in the order `tools/list` reports them.
pub fn operations() -> Vec<OperationSpec> {
    let forecast = |name, description, model| OperationSpec {
        name,
        description,
        parameters: forecast_schema(),
        operation: Operation::Forecast(model),
    };

    vec![
        forecast(
            "weather_forecast",
            "Weather forecast for any location using the best-suited weather models. \
             Returns hourly, daily and current variables for up to 16 days.",
            ForecastModel::BestMatch,
        ),
        OperationSpec {
            name: "weather_archive",
            description: "Historical weather data from the ERA5 reanalysis, from 1940 onwards. \
                          Requires a start and end date.",
            parameters: archive_schema(),
            operation: Operation::Archive,
        },
        OperationSpec {
            name: "air_quality",
            description: "Air quality forecast: particulate matter (PM2.5, PM10), ozone, \
                          nitrogen dioxide, pollen and European/US AQI.",
            parameters: air_quality_schema(),
            operation: Operation::AirQuality,
        },
        OperationSpec {
            name: "marine_weather",
            description: "Marine forecast: wave height, direction and period, swell and \
                          wind waves, ocean currents.",
            parameters: marine_schema(),
            operation: Operation::Marine,
        },
        OperationSpec {
            name: "elevation",
            description: "Terrain elevation in meters for one or more coordinates \
                          (90 m digital elevation model).",
            parameters: elevation_schema(),
            operation: Operation::Elevation,
        },
        forecast(
            "dwd_icon_forecast",
            "Forecast from the German Weather Service (DWD) ICON models. \
             High resolution over Central Europe.",
            ForecastModel::DwdIcon,
        ),
        forecast(
            "gfs_forecast",
            "Forecast from the NOAA GFS and HRRR models. High resolution over North America.",
            ForecastModel::Gfs,
        ),
        forecast(
            "meteofrance_forecast",
            "Forecast from the Meteo-France AROME and ARPEGE models. High resolution over France.",
            ForecastModel::MeteoFrance,
        ),
        forecast(
            "ecmwf_forecast",
            "Forecast from the ECMWF IFS global model.",
            ForecastModel::Ecmwf,
        ),
        forecast(
            "jma_forecast",
            "Forecast from the Japan Meteorological Agency models. High resolution over Japan.",
            ForecastModel::Jma,
        ),
        forecast(
            "metno_forecast",
            "Forecast from MET Norway. High resolution over the Nordic countries.",
            ForecastModel::Metno,
        ),
        forecast(
            "gem_forecast",
            "Forecast from the Canadian Meteorological Centre GEM models.",
            ForecastModel::Gem,
        ),
        OperationSpec {
            name: "flood_forecast",
            description: "River discharge forecast from the GloFAS flood model, \
                          up to 210 days ahead, with optional ensemble members.",
            parameters: flood_schema(),
            operation: Operation::Flood,
        },
        forecast(
            "seasonal_forecast",
            "Long-range seasonal forecast (ECMWF SEAS5) for up to nine months.",
            ForecastModel::Seasonal,
        ),
        forecast(
            "climate_projection",
            "Downscaled CMIP6 climate projections up to 2050. \
             Use start_date and end_date to choose the period.",
            ForecastModel::Climate,
        ),
        forecast(
            "ensemble_forecast",
            "Ensemble forecast with all individual members, for estimating forecast uncertainty.",
            ForecastModel::Ensemble,
        ),
        OperationSpec {
            name: "geocoding",
            description: "Search locations by name or postal code and get their coordinates, \
                          elevation, timezone and country.",
            parameters: geocoding_schema(),
            operation: Operation::Geocoding,
        },
    ]
}

/// Build a registry holding every catalog operation bound to `client`.
pub fn weather_registry(client: Arc<OpenMeteoClient>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for spec in operations() {
        registry.register(Arc::new(WeatherTool::new(
            spec.name,
            spec.description,
            spec.parameters,
            spec.operation,
            client.clone(),
        )));
    }
    registry
}

// Field builders

fn latitude() -> FieldSpec {
    FieldSpec::new(
        "latitude",
        FieldKind::Number {
            min: Some(-90.0),
            max: Some(90.0),
        },
        "Latitude in WGS84 decimal degrees",
    )
    .required()
}

fn longitude() -> FieldSpec {
    FieldSpec::new(
        "longitude",
        FieldKind::Number {
            min: Some(-180.0),
            max: Some(180.0),
        },
        "Longitude in WGS84 decimal degrees",
    )
    .required()
}

fn variables(name: &'static str, description: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::VariableList, description)
}

fn choice(
    name: &'static str,
    allowed: &'static [&'static str],
    default: &'static str,
    description: &'static str,
) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Enum(allowed), description).with_default(default)
}

fn days(name: &'static str, max: i64, description: &'static str) -> FieldSpec {
    FieldSpec::new(
        name,
        FieldKind::Integer {
            min: Some(0),
            max: Some(max),
        },
        description,
    )
}

fn timezone() -> FieldSpec {
    FieldSpec::new(
        "timezone",
        FieldKind::String {
            min_len: 1,
            max_len: Some(64),
        },
        "Timezone name such as Europe/Berlin, or \"auto\" to resolve from the coordinates. Defaults to GMT.",
    )
}

fn timeformat() -> FieldSpec {
    choice(
        "timeformat",
        TIME_FORMATS,
        "iso8601",
        "Format of returned timestamps",
    )
}

fn date(name: &'static str, description: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Date, description)
}

fn date_range(schema: ParameterSchema, required: bool) -> ParameterSchema {
    let (start, end) = if required {
        (
            date("start_date", "First day of the period (YYYY-MM-DD)").required(),
            date("end_date", "Last day of the period (YYYY-MM-DD)").required(),
        )
    } else {
        (
            date("start_date", "First day of the period (YYYY-MM-DD). Requires end_date."),
            date("end_date", "Last day of the period (YYYY-MM-DD). Requires start_date."),
        )
    };
    schema.field(start).field(end).rule(CrossFieldRule::DateRange {
        start: "start_date",
        end: "end_date",
    })
}

fn weather_units(schema: ParameterSchema) -> ParameterSchema {
    schema
        .field(choice(
            "temperature_unit",
            TEMPERATURE_UNITS,
            "celsius",
            "Temperature unit",
        ))
        .field(choice(
            "wind_speed_unit",
            WIND_SPEED_UNITS,
            "kmh",
            "Wind speed unit",
        ))
        .field(choice(
            "precipitation_unit",
            PRECIPITATION_UNITS,
            "mm",
            "Precipitation unit",
        ))
}

// Per-operation schemas

pub fn forecast_schema() -> ParameterSchema {
    let schema = ParameterSchema::new()
        .field(latitude())
        .field(longitude())
        .field(variables(
            "hourly",
            "Hourly variables, e.g. temperature_2m, relative_humidity_2m, precipitation, wind_speed_10m",
        ))
        .field(variables(
            "daily",
            "Daily variables, e.g. temperature_2m_max, temperature_2m_min, precipitation_sum, sunrise",
        ))
        .field(variables(
            "current",
            "Current conditions variables, e.g. temperature_2m, weather_code",
        ))
        .field(variables(
            "models",
            "Specific weather models, e.g. icon_seamless, gfs_seamless, ecmwf_ifs025",
        ));
    let schema = weather_units(schema)
        .field(timeformat())
        .field(timezone())
        .field(days("past_days", 92, "Include this many past days"))
        .field(days("forecast_days", 16, "Number of forecast days"));
    date_range(schema, false)
}

pub fn archive_schema() -> ParameterSchema {
    let schema = ParameterSchema::new().field(latitude()).field(longitude());
    let schema = date_range(schema, true)
        .field(variables(
            "hourly",
            "Hourly variables, e.g. temperature_2m, precipitation",
        ))
        .field(variables(
            "daily",
            "Daily variables, e.g. temperature_2m_max, precipitation_sum",
        ));
    weather_units(schema).field(timeformat()).field(timezone())
}

pub fn air_quality_schema() -> ParameterSchema {
    let schema = ParameterSchema::new()
        .field(latitude())
        .field(longitude())
        .field(variables(
            "hourly",
            "Hourly variables, e.g. pm10, pm2_5, ozone, nitrogen_dioxide, european_aqi, us_aqi",
        ))
        .field(variables("current", "Current air quality variables"))
        .field(choice(
            "domains",
            AIR_QUALITY_DOMAINS,
            "auto",
            "CAMS domain: European (11 km) or global (40 km)",
        ))
        .field(timeformat())
        .field(timezone())
        .field(days("past_days", 92, "Include this many past days"))
        .field(days("forecast_days", 7, "Number of forecast days"));
    date_range(schema, false)
}

pub fn marine_schema() -> ParameterSchema {
    let schema = ParameterSchema::new()
        .field(latitude())
        .field(longitude())
        .field(variables(
            "hourly",
            "Hourly variables, e.g. wave_height, wave_direction, wave_period, swell_wave_height",
        ))
        .field(variables(
            "daily",
            "Daily variables, e.g. wave_height_max, wave_direction_dominant",
        ))
        .field(variables("current", "Current marine variables"))
        .field(choice(
            "length_unit",
            LENGTH_UNITS,
            "metric",
            "Unit for wave heights",
        ))
        .field(timeformat())
        .field(timezone())
        .field(days("past_days", 92, "Include this many past days"))
        .field(days("forecast_days", 16, "Number of forecast days"));
    date_range(schema, false)
}

pub fn flood_schema() -> ParameterSchema {
    let schema = ParameterSchema::new()
        .field(latitude())
        .field(longitude())
        .field(variables(
            "daily",
            "Daily variables, e.g. river_discharge, river_discharge_mean, river_discharge_max",
        ))
        .field(timeformat())
        .field(days("past_days", 92, "Include this many past days"))
        .field(days("forecast_days", 210, "Number of forecast days"))
        .field(
            FieldSpec::new(
                "ensemble",
                FieldKind::Boolean,
                "Return all ensemble members",
            )
            .with_default(false),
        )
        .field(choice(
            "cell_selection",
            CELL_SELECTIONS,
            "nearest",
            "How the river grid cell is chosen",
        ));
    date_range(schema, false)
}

pub fn elevation_schema() -> ParameterSchema {
    let coordinate = |name, min, max, description| {
        FieldSpec::new(
            name,
            FieldKind::NumberList {
                min,
                max,
                max_items: MAX_ELEVATION_COORDINATES,
            },
            description,
        )
        .required()
    };

    ParameterSchema::new()
        .field(coordinate(
            "latitude",
            -90.0,
            90.0,
            "Latitude, or a list of up to 100 latitudes",
        ))
        .field(coordinate(
            "longitude",
            -180.0,
            180.0,
            "Longitude, or a list of up to 100 longitudes matching latitude",
        ))
        .rule(CrossFieldRule::SameLength("latitude", "longitude"))
}

pub fn geocoding_schema() -> ParameterSchema {
    ParameterSchema::new()
        .field(
            FieldSpec::new(
                "name",
                FieldKind::String {
                    min_len: 2,
                    max_len: Some(200),
                },
                "Place name or postal code to search for",
            )
            .required(),
        )
        .field(
            FieldSpec::new(
                "count",
                FieldKind::Integer {
                    min: Some(1),
                    max: Some(100),
                },
                "Number of results",
            )
            .with_default(10),
        )
        .field(
            FieldSpec::new(
                "language",
                FieldKind::String {
                    min_len: 2,
                    max_len: Some(8),
                },
                "Language code for translated names",
            )
            .with_default("en"),
        )
        .field(FieldSpec::new(
            "country_code",
            FieldKind::CountryCode,
            "ISO-3166-1 alpha-2 country code to filter results, e.g. DE",
        ))
}
