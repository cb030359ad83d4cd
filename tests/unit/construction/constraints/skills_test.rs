use super::*;
use crate::helpers::construction::{create_constraint_pipeline_with_module, create_empty_solution_context};
use crate::helpers::models::problem::{test_costs, DEFAULT_JOB_LOCATION, DEFAULT_VEHICLE_LOCATION};
use crate::models::problem::{Fleet, ServiceBuilder, Vehicle, VehicleBuilder};

fn create_job_with_skills(skills: &[&str]) -> Job {
    let builder = skills
        .iter()
        .fold(ServiceBuilder::new("job").with_location(DEFAULT_JOB_LOCATION), |builder, skill| {
            builder.with_skill(skill)
        });

    builder.build().unwrap().into()
}

fn create_vehicle_with_skills(skills: &[&str]) -> Vehicle {
    let builder = skills.iter().fold(
        VehicleBuilder::new("v1").with_start(DEFAULT_VEHICLE_LOCATION).with_costs(test_costs()),
        |builder, skill| builder.with_skill(skill),
    );

    builder.build().unwrap()
}

parameterized_test! {can_check_skills, (job_skills, vehicle_skills, expected), {
    can_check_skills_impl(job_skills, vehicle_skills, expected);
}}

can_check_skills! {
    case_01_no_skills: (vec![], vec![], None),
    case_02_vehicle_lacks_skill: (vec!["fridge"], vec![], Some(RouteConstraintViolation { code: 1 })),
    case_03_matching_skill: (vec!["fridge"], vec!["fridge"], None),
    case_04_partial_match: (vec!["fridge", "fragile"], vec!["fridge"], Some(RouteConstraintViolation { code: 1 })),
    case_05_vehicle_extra_skills: (vec![], vec!["fridge"], None),
    case_06_vehicle_superset: (vec!["fridge"], vec!["fridge", "fragile"], None),
}

fn can_check_skills_impl(job_skills: Vec<&str>, vehicle_skills: Vec<&str>, expected: Option<RouteConstraintViolation>) {
    let pipeline = create_constraint_pipeline_with_module(Arc::new(SkillsConstraintModule::new(1)));
    let fleet = Fleet::new(vec![Arc::new(create_vehicle_with_skills(&vehicle_skills))]);
    let solution_ctx = create_empty_solution_context(&fleet);
    let route_ctx = RouteContext::new(fleet.vehicles[0].clone());

    let result = pipeline.evaluate_hard_route(&solution_ctx, &route_ctx, &create_job_with_skills(&job_skills));

    assert_eq!(result, expected);
}
