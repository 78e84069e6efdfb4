use actix_casbin_auth::casbin::function_map::key_match2;
use actix_casbin_auth::casbin::{CoreApi, DefaultModel, FileAdapter};
use actix_casbin_auth::CasbinService;
use std::io::{Error, ErrorKind};

const MODEL_PATH: &str = "access_control/model.conf";
const POLICY_PATH: &str = "access_control/policy.csv";

/// Role/route policy enforcer. Subjects are the roles put in place by authentication.
pub async fn try_new() -> Result<CasbinService, Error> {
    let m = DefaultModel::from_file(MODEL_PATH)
        .await
        .map_err(|err| Error::new(ErrorKind::Other, format!("{err:?}")))?;
    let a = FileAdapter::new(POLICY_PATH);

    let casbin_service = CasbinService::new(m, a)
        .await
        .map_err(|err| Error::new(ErrorKind::Other, format!("{err:?}")))?;

    casbin_service
        .write()
        .await
        .get_role_manager()
        .write()
        .matching_fn(Some(key_match2), None);

    Ok(casbin_service)
}
