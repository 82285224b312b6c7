use std::collections::VecDeque;
use std::sync::Mutex;

use actix_web::{HttpResponse, Responder, get, post, put, web};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use biased_dice_core::DiceError;
use biased_dice_core::io::{list_profiles, normalize_folder, profile_path, read_weights};
use biased_dice_core::model::dice_table::DiceTable;
use biased_dice_core::model::distribution::{Distribution, Weight};
use biased_dice_core::model::roll_input::{RollInput, RollOutcome};
use biased_dice_core::model::validator::ValidationResult;

/// State shared by every request: one dice table and its recent rolls.
///
/// The history lives in memory only and is lost on restart.
pub struct SharedData {
	pub table: DiceTable,
	pub history: VecDeque<RollOutcome>,
	pub history_limit: usize,
	pub profiles_dir: String,
}

impl SharedData {
	pub fn new(table: DiceTable, history_limit: usize, profiles_dir: String) -> Self {
		Self { table, history: VecDeque::with_capacity(history_limit), history_limit, profiles_dir }
	}

	/// Records an outcome, newest first, dropping the oldest beyond the limit.
	fn remember(&mut self, outcome: RollOutcome) {
		self.history.push_front(outcome);
		self.history.truncate(self.history_limit);
	}
}

pub type SharedState = web::Data<Mutex<SharedData>>;

/// Query parameters of `/v1/roll`.
#[derive(Deserialize)]
struct RollParams {
	dice: Option<u32>,
	consistency: Option<u32>,
}

#[derive(Deserialize)]
struct FacesParams {
	count: u32,
}

#[derive(Deserialize)]
struct WeightsBody {
	weights: Vec<Weight>,
}

/// Snapshot of the table, enough to redraw weight bars and the total indicator.
#[derive(Serialize)]
pub struct DistributionView {
	pub face_count: u32,
	pub weights: Vec<Weight>,
	pub bar_widths: Vec<f64>,
	pub validation: ValidationResult,
}

impl DistributionView {
	fn of(table: &DiceTable) -> Self {
		let distribution = table.distribution();
		Self {
			face_count: distribution.face_count(),
			weights: distribution.weights().to_vec(),
			bar_widths: distribution.bar_widths(),
			validation: table.validate(),
		}
	}
}

/// Maps a core error to a response. Every core error is caused by the request.
fn error_response(error: DiceError) -> HttpResponse {
	match error {
		DiceError::Io(e) => HttpResponse::InternalServerError().body(e.to_string()),
		e => HttpResponse::BadRequest().body(e.to_string()),
	}
}

macro_rules! lock {
	($data:expr) => {
		match $data.lock() {
			Ok(guard) => guard,
			Err(_) => return HttpResponse::InternalServerError().body("Table lock failed"),
		}
	};
}

/// HTTP GET endpoint `/v1/distribution`
#[get("/v1/distribution")]
async fn get_distribution(data: SharedState) -> impl Responder {
	let shared_data = lock!(data);
	HttpResponse::Ok().json(DistributionView::of(&shared_data.table))
}

/// HTTP PUT endpoint `/v1/distribution`
///
/// Replaces every weight; the face count follows the number of weights.
#[put("/v1/distribution")]
async fn put_distribution(data: SharedState, body: web::Json<WeightsBody>) -> impl Responder {
	let distribution = match Distribution::new(body.into_inner().weights) {
		Ok(d) => d,
		Err(e) => return error_response(e),
	};
	let mut shared_data = lock!(data);
	shared_data.table.set_distribution(distribution);
	HttpResponse::Ok().json(DistributionView::of(&shared_data.table))
}

/// HTTP PUT endpoint `/v1/faces`
///
/// Changes the face count and regenerates the default weights.
#[put("/v1/faces")]
async fn put_faces(data: SharedState, query: web::Query<FacesParams>) -> impl Responder {
	let mut shared_data = lock!(data);
	match shared_data.table.set_face_count(query.count) {
		Ok(()) => HttpResponse::Ok().json(DistributionView::of(&shared_data.table)),
		Err(e) => error_response(e),
	}
}

/// HTTP POST endpoint `/v1/reset`
#[post("/v1/reset")]
async fn post_reset(data: SharedState) -> impl Responder {
	let mut shared_data = lock!(data);
	match shared_data.table.reset() {
		Ok(()) => HttpResponse::Ok().json(DistributionView::of(&shared_data.table)),
		Err(e) => error_response(e),
	}
}

/// HTTP POST endpoint `/v1/normalize`
///
/// Fails with 400 when every weight is zero; the weights are then kept.
#[post("/v1/normalize")]
async fn post_normalize(data: SharedState) -> impl Responder {
	let mut shared_data = lock!(data);
	if let Err(e) = shared_data.table.normalize() {
		warn!("normalization refused: {e}");
		return error_response(e);
	}
	HttpResponse::Ok().json(DistributionView::of(&shared_data.table))
}

/// HTTP GET endpoint `/v1/validate`
#[get("/v1/validate")]
async fn get_validate(data: SharedState) -> impl Responder {
	let shared_data = lock!(data);
	HttpResponse::Ok().json(shared_data.table.validate())
}

/// HTTP GET endpoint `/v1/roll`
///
/// Rolls `dice` dice (default 1) with `consistency` percent (default 0).
#[get("/v1/roll")]
async fn get_roll(data: SharedState, query: web::Query<RollParams>) -> impl Responder {
	let input = match RollInput::new(query.dice.unwrap_or(1), query.consistency.unwrap_or(0)) {
		Ok(input) => input,
		Err(e) => return error_response(e),
	};

	let mut shared_data = lock!(data);
	let outcome = shared_data.table.roll(&input, &mut rand::rng());
	shared_data.remember(outcome.clone());
	HttpResponse::Ok().json(outcome)
}

/// HTTP GET endpoint `/v1/history`
///
/// Most recent rolls, newest first.
#[get("/v1/history")]
async fn get_history(data: SharedState) -> impl Responder {
	let shared_data = lock!(data);
	HttpResponse::Ok().json(&shared_data.history)
}

/// HTTP GET endpoint `/v1/profiles`
#[get("/v1/profiles")]
async fn get_profiles(data: SharedState) -> impl Responder {
	let folder = {
		let shared_data = lock!(data);
		normalize_folder(&shared_data.profiles_dir)
	};
	match list_profiles(folder) {
		Ok(names) => HttpResponse::Ok().json(names),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list profiles"),
	}
}

/// HTTP PUT endpoint `/v1/profiles/{name}`
///
/// Loads the weights of a profile into the table.
#[put("/v1/profiles/{name}")]
async fn put_profile(data: SharedState, name: web::Path<String>) -> impl Responder {
	let name = name.into_inner();
	if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
		return HttpResponse::BadRequest().body("Invalid profile name");
	}

	let mut shared_data = lock!(data);
	let path = profile_path(normalize_folder(&shared_data.profiles_dir), &name);
	if !path.is_file() {
		return HttpResponse::NotFound().body(format!("Profile {name} not found"));
	}

	match read_weights(&path) {
		Ok(distribution) => {
			info!("loaded profile {name} ({} faces)", distribution.face_count());
			shared_data.table.set_distribution(distribution);
			HttpResponse::Ok().json(DistributionView::of(&shared_data.table))
		}
		Err(e) => error_response(e),
	}
}

/// Registers every endpoint.
pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_distribution)
		.service(put_distribution)
		.service(put_faces)
		.service(post_reset)
		.service(post_normalize)
		.service(get_validate)
		.service(get_roll)
		.service(get_history)
		.service(get_profiles)
		.service(put_profile);
}
