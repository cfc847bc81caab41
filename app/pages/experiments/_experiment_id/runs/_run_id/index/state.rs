use crate::common::{
	error::Error,
	experiments::{get_experiment, Experiment},
	runs::{get_run_payload, RunPayload},
};
use anyhow::Result;
use kite_id::Id;

/// The run and experiment ids this page view was navigated to. Fixed for
/// the lifetime of the view; navigating elsewhere is a new page view, not a
/// mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteIdentity {
	pub experiment_id: Id,
	pub run_id: Id,
}

impl RouteIdentity {
	/// Empty path segments mean the router handed us a request it should
	/// not have matched, which is a bug upstream, so abort. Ids that are
	/// present but malformed are an ordinary not found.
	pub fn new(experiment_id: &str, run_id: &str) -> Result<RouteIdentity> {
		assert!(
			!experiment_id.is_empty() && !run_id.is_empty(),
			"run page routed without a complete route identity",
		);
		let experiment_id: Id = experiment_id.parse().map_err(|_| Error::NotFound)?;
		let run_id: Id = run_id.parse().map_err(|_| Error::NotFound)?;
		Ok(RouteIdentity {
			experiment_id,
			run_id,
		})
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchFailureKind {
	ResourceDoesNotExist,
	Other,
}

#[derive(Clone, Debug)]
pub struct FetchFailure {
	pub kind: FetchFailureKind,
	pub message: String,
}

/// The tri-state result of one asynchronous fetch. Each fetch transitions
/// from Loading to exactly one terminal variant per navigation.
#[derive(Clone, Debug)]
pub enum FetchOutcome<T> {
	Loading,
	Success(T),
	Failure(FetchFailure),
}

impl<T> FetchOutcome<T> {
	pub fn from_fetch(result: Result<Option<T>>) -> FetchOutcome<T> {
		match result {
			Ok(Some(payload)) => FetchOutcome::Success(payload),
			Ok(None) => FetchOutcome::Failure(FetchFailure {
				kind: FetchFailureKind::ResourceDoesNotExist,
				message: "resource does not exist".to_owned(),
			}),
			Err(error) => FetchOutcome::Failure(FetchFailure {
				kind: FetchFailureKind::Other,
				message: error.to_string(),
			}),
		}
	}

	fn is_loading(&self) -> bool {
		match self {
			FetchOutcome::Loading => true,
			_ => false,
		}
	}

	fn failure(&self) -> Option<&FetchFailure> {
		match self {
			FetchOutcome::Failure(failure) => Some(failure),
			_ => None,
		}
	}
}

/// The single top level decision of what the page shows. Always derived
/// from the fetch outcomes, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
	InitialLoading,
	RunNotFound,
	ExperimentNotFound,
	GenericError,
	Ready,
}

/// State for one run page view: the two fetch outcomes plus the last
/// successful payload of each entity. The remembered payloads are what
/// keeps a refetch from regressing the page to the skeleton, and their
/// presence is monotonic for the lifetime of the view.
pub struct PageState {
	identity: RouteIdentity,
	run: FetchOutcome<RunPayload>,
	experiment: FetchOutcome<Experiment>,
	remembered_run: Option<RunPayload>,
	remembered_experiment: Option<Experiment>,
}

impl PageState {
	pub fn new(identity: RouteIdentity) -> PageState {
		PageState {
			identity,
			run: FetchOutcome::Loading,
			experiment: FetchOutcome::Loading,
			remembered_run: None,
			remembered_experiment: None,
		}
	}

	pub fn identity(&self) -> RouteIdentity {
		self.identity
	}

	/// Apply a run fetch completion. Completions are tagged with the
	/// identity they were issued for and a completion for a different
	/// identity is discarded, so a late response for a previous page view
	/// can never update this one.
	pub fn apply_run(&mut self, identity: RouteIdentity, outcome: FetchOutcome<RunPayload>) {
		if identity != self.identity {
			return;
		}
		if let FetchOutcome::Success(payload) = &outcome {
			self.remembered_run = Some(payload.clone());
		}
		self.run = outcome;
	}

	pub fn apply_experiment(
		&mut self,
		identity: RouteIdentity,
		outcome: FetchOutcome<Experiment>,
	) {
		if identity != self.identity {
			return;
		}
		if let FetchOutcome::Success(payload) = &outcome {
			self.remembered_experiment = Some(payload.clone());
		}
		self.experiment = outcome;
	}

	/// Return the run fetch to Loading ahead of a refetch. The remembered
	/// payload is kept, so the page keeps rendering the previous content
	/// instead of the skeleton while the refetch is in flight.
	pub fn begin_run_refetch(&mut self) {
		self.run = FetchOutcome::Loading;
	}

	pub fn run_payload(&self) -> Option<&RunPayload> {
		match &self.run {
			FetchOutcome::Success(payload) => Some(payload),
			_ => self.remembered_run.as_ref(),
		}
	}

	pub fn experiment_payload(&self) -> Option<&Experiment> {
		match &self.experiment {
			FetchOutcome::Success(payload) => Some(payload),
			_ => self.remembered_experiment.as_ref(),
		}
	}

	pub fn failures(&self) -> Vec<&FetchFailure> {
		let mut failures = Vec::new();
		if let Some(failure) = self.run.failure() {
			failures.push(failure);
		}
		if let Some(failure) = self.experiment.failure() {
			failures.push(failure);
		}
		failures
	}

	/// Reconcile the two fetch outcomes into one display mode. First match
	/// wins, and the order encodes priority: a missing run outranks a
	/// missing experiment, not found outranks any other failure so the
	/// more actionable condition is reported, and the skeleton is shown
	/// only before the first success ever observed for either entity.
	pub fn display_mode(&self) -> DisplayMode {
		if let Some(failure) = self.run.failure() {
			if failure.kind == FetchFailureKind::ResourceDoesNotExist {
				return DisplayMode::RunNotFound;
			}
		}
		if let Some(failure) = self.experiment.failure() {
			if failure.kind == FetchFailureKind::ResourceDoesNotExist {
				return DisplayMode::ExperimentNotFound;
			}
		}
		if self.run.failure().is_some() || self.experiment.failure().is_some() {
			return DisplayMode::GenericError;
		}
		let loading = self.run.is_loading() || self.experiment.is_loading();
		let ever_succeeded =
			self.remembered_run.is_some() || self.remembered_experiment.is_some();
		if loading && !ever_succeeded {
			return DisplayMode::InitialLoading;
		}
		DisplayMode::Ready
	}
}

pub async fn fetch_run(
	pool: &sqlx::AnyPool,
	identity: RouteIdentity,
) -> FetchOutcome<RunPayload> {
	let result = get_run_payload(pool, identity.run_id).await;
	// A run that exists under a different experiment is not found under
	// this route.
	let result = result.map(|payload| {
		payload.filter(|payload| payload.info.experiment_id == identity.experiment_id)
	});
	FetchOutcome::from_fetch(result)
}

pub async fn fetch_experiment(
	pool: &sqlx::AnyPool,
	identity: RouteIdentity,
) -> FetchOutcome<Experiment> {
	FetchOutcome::from_fetch(get_experiment(pool, identity.experiment_id).await)
}

#[cfg(test)]
mod test {
	use super::{
		DisplayMode, FetchFailure, FetchFailureKind, FetchOutcome, PageState, RouteIdentity,
	};
	use crate::common::{experiments::Experiment, runs::{RunInfo, RunPayload}};
	use kite_id::Id;

	fn identity() -> RouteIdentity {
		RouteIdentity {
			experiment_id: "0102030405060708090a0b0c0d0e0f10".parse().unwrap(),
			run_id: "f0e0d0c0b0a090807060504030201000".parse().unwrap(),
		}
	}

	fn other_identity() -> RouteIdentity {
		RouteIdentity {
			experiment_id: "0102030405060708090a0b0c0d0e0f10".parse().unwrap(),
			run_id: "00000000000000000000000000000001".parse().unwrap(),
		}
	}

	fn run_payload(identity: RouteIdentity) -> RunPayload {
		RunPayload {
			info: RunInfo {
				id: identity.run_id,
				experiment_id: identity.experiment_id,
				title: "run".to_owned(),
				artifact_uri: None,
				created_at: 0,
			},
			latest_metrics: Vec::new(),
			params: Vec::new(),
			tags: Vec::new(),
		}
	}

	fn experiment(identity: RouteIdentity) -> Experiment {
		Experiment {
			id: identity.experiment_id,
			title: "experiment".to_owned(),
			created_at: 0,
		}
	}

	fn not_found() -> FetchFailure {
		FetchFailure {
			kind: FetchFailureKind::ResourceDoesNotExist,
			message: "resource does not exist".to_owned(),
		}
	}

	fn other_failure() -> FetchFailure {
		FetchFailure {
			kind: FetchFailureKind::Other,
			message: "connection reset".to_owned(),
		}
	}

	#[test]
	fn test_initial_loading_before_any_success() {
		let state = PageState::new(identity());
		assert_eq!(state.display_mode(), DisplayMode::InitialLoading);
	}

	#[test]
	fn test_display_mode_is_deterministic() {
		let identity = identity();
		let mut state = PageState::new(identity);
		state.apply_run(identity, FetchOutcome::Success(run_payload(identity)));
		state.apply_experiment(identity, FetchOutcome::Failure(other_failure()));
		assert_eq!(state.display_mode(), state.display_mode());
	}

	#[test]
	fn test_run_not_found_outranks_experiment_outcome() {
		let identity = identity();
		// Run missing while the experiment fetch succeeds.
		let mut state = PageState::new(identity);
		state.apply_run(identity, FetchOutcome::Failure(not_found()));
		state.apply_experiment(identity, FetchOutcome::Success(experiment(identity)));
		assert_eq!(state.display_mode(), DisplayMode::RunNotFound);
		// Run missing while the experiment fetch fails some other way.
		let mut state = PageState::new(identity);
		state.apply_run(identity, FetchOutcome::Failure(not_found()));
		state.apply_experiment(identity, FetchOutcome::Failure(other_failure()));
		assert_eq!(state.display_mode(), DisplayMode::RunNotFound);
		// Run missing while the experiment is missing too.
		let mut state = PageState::new(identity);
		state.apply_run(identity, FetchOutcome::Failure(not_found()));
		state.apply_experiment(identity, FetchOutcome::Failure(not_found()));
		assert_eq!(state.display_mode(), DisplayMode::RunNotFound);
	}

	#[test]
	fn test_experiment_not_found() {
		let identity = identity();
		let mut state = PageState::new(identity);
		state.apply_run(identity, FetchOutcome::Success(run_payload(identity)));
		state.apply_experiment(identity, FetchOutcome::Failure(not_found()));
		assert_eq!(state.display_mode(), DisplayMode::ExperimentNotFound);
	}

	#[test]
	fn test_generic_error_on_any_other_failure() {
		let identity = identity();
		let mut state = PageState::new(identity);
		state.apply_run(identity, FetchOutcome::Success(run_payload(identity)));
		state.apply_experiment(identity, FetchOutcome::Failure(other_failure()));
		assert_eq!(state.display_mode(), DisplayMode::GenericError);
		let mut state = PageState::new(identity);
		state.apply_run(identity, FetchOutcome::Failure(other_failure()));
		assert_eq!(state.display_mode(), DisplayMode::GenericError);
	}

	#[test]
	fn test_ready_when_both_succeed() {
		let identity = identity();
		let mut state = PageState::new(identity);
		state.apply_run(identity, FetchOutcome::Success(run_payload(identity)));
		state.apply_experiment(identity, FetchOutcome::Success(experiment(identity)));
		assert_eq!(state.display_mode(), DisplayMode::Ready);
		assert!(state.run_payload().is_some());
		assert!(state.experiment_payload().is_some());
	}

	#[test]
	fn test_refetch_does_not_regress_to_skeleton() {
		let identity = identity();
		let mut state = PageState::new(identity);
		state.apply_run(identity, FetchOutcome::Success(run_payload(identity)));
		state.apply_experiment(identity, FetchOutcome::Success(experiment(identity)));
		state.begin_run_refetch();
		assert_eq!(state.display_mode(), DisplayMode::Ready);
		// The previous content stays available while the refetch is in
		// flight.
		assert_eq!(state.run_payload().unwrap().info.title, "run");
	}

	#[test]
	fn test_stale_completion_is_discarded() {
		let identity = identity();
		let mut state = PageState::new(identity);
		state.apply_run(identity, FetchOutcome::Success(run_payload(identity)));
		state.apply_experiment(identity, FetchOutcome::Success(experiment(identity)));
		// A completion for another run id must not touch this view.
		state.apply_run(other_identity(), FetchOutcome::Failure(not_found()));
		assert_eq!(state.display_mode(), DisplayMode::Ready);
		assert_eq!(
			state.run_payload().unwrap().info.id,
			identity.run_id,
		);
	}

	#[test]
	fn test_route_identity_rejects_malformed_ids() {
		assert!(RouteIdentity::new("not an id", "also not an id").is_err());
	}

	#[test]
	#[should_panic]
	fn test_route_identity_panics_on_missing_segment() {
		let _ = RouteIdentity::new("", "f0e0d0c0b0a090807060504030201000");
	}
}
