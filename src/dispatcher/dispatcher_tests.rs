/*
 * Unit tests for the dispatcher module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 *  - construction bounds
 *  - start / stop transitions
 *  - request admission
 *  - batch assignment at both terminals
 *  - return to ground after stop
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod dispatcher_tests {
    use crate::car::CarState;
    use crate::config::{BuildingConfig, CarConfig};
    use crate::dispatcher::Dispatcher;
    use crate::shared::{DispatchError, DoorState, Request, SystemStatus};

    fn setup_dispatcher() -> Dispatcher {
        let mut dispatcher = Dispatcher::new(11, 8, 5).unwrap();
        dispatcher.start().unwrap();
        dispatcher
    }

    fn tick_n(dispatcher: &mut Dispatcher, n: usize) {
        for _ in 0..n {
            dispatcher.tick();
        }
    }

    fn lit_floors(requests: &[bool]) -> Vec<usize> {
        requests
            .iter()
            .enumerate()
            .filter(|&(_, &lit)| lit)
            .map(|(floor, _)| floor)
            .collect()
    }

    #[test]
    fn test_dispatcher_init() {
        // Act
        let dispatcher = Dispatcher::new(11, 8, 5).unwrap();
        let report = dispatcher.snapshot();

        // Assert
        assert_eq!(report.status, SystemStatus::OutOfService);
        assert_eq!(report.n_floors, 11);
        assert_eq!(report.n_cars, 8);
        assert_eq!(report.capacity, 5);
        assert_eq!(report.tick, 0);
        assert_eq!(report.cars.len(), 8);
        assert!(report.up_requests.is_empty());
        assert!(report.down_requests.is_empty());
        assert!(report.cars.iter().all(|car| car.out_of_service && car.floor == 0));
    }

    #[test]
    fn test_dispatcher_rejects_bad_config() {
        // Purpose: Verify every construction bound, including the car timing values

        let cases = [
            (Dispatcher::new(2, 5, 4), "n_floors"),
            (Dispatcher::new(31, 5, 4), "n_floors"),
            (Dispatcher::new(30, 0, 4), "n_cars"),
            (Dispatcher::new(29, 5, 3), "capacity"),
            (Dispatcher::new(28, 10, 21), "capacity"),
        ];

        for (result, expected_field) in cases {
            match result {
                Err(DispatchError::InvalidConfig { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("expected InvalidConfig for {}, got {:?}", expected_field, other),
            }
        }

        let no_door_time = CarConfig {
            door_open_ticks: 0,
            ..CarConfig::default()
        };
        assert!(matches!(
            Dispatcher::with_car_config(10, 1, 5, no_door_time),
            Err(DispatchError::InvalidConfig { field: "door_open_ticks", .. })
        ));

        let frozen = CarConfig {
            ticks_per_floor: 0,
            ..CarConfig::default()
        };
        assert!(matches!(
            Dispatcher::with_car_config(10, 1, 5, frozen),
            Err(DispatchError::InvalidConfig { field: "ticks_per_floor", .. })
        ));
    }

    #[test]
    fn test_dispatcher_accepts_bounds() {
        assert!(Dispatcher::new(3, 1, 4).is_ok());
        assert!(Dispatcher::new(30, 1, 20).is_ok());
        assert!(Dispatcher::from_config(&BuildingConfig::default(), &CarConfig::default()).is_ok());
    }

    #[test]
    fn test_start() {
        // Arrange
        let mut dispatcher = Dispatcher::new(11, 8, 5).unwrap();

        // Act
        let started = dispatcher.start();

        // Assert
        assert_eq!(started, Ok(true));
        let report = dispatcher.snapshot();
        assert_eq!(report.status, SystemStatus::Running);
        for car in &report.cars {
            assert!(!car.out_of_service);
            assert!(car.accepting);
            assert_eq!(car.door, DoorState::Closed);
        }
    }

    #[test]
    fn test_start_twice() {
        // Arrange
        let mut dispatcher = setup_dispatcher();
        let before = dispatcher.snapshot();

        // Act & Assert
        assert_eq!(dispatcher.start(), Ok(false));
        assert_eq!(dispatcher.snapshot(), before);
    }

    #[test]
    fn test_start_while_stopping() {
        // Arrange
        let mut dispatcher = setup_dispatcher();
        dispatcher.stop();

        // Act & Assert
        assert_eq!(dispatcher.start(), Err(DispatchError::AlreadyStopping));
        assert_eq!(dispatcher.status(), SystemStatus::Stopping);
    }

    #[test]
    fn test_add_request() {
        // Arrange
        let mut dispatcher = setup_dispatcher();

        // Act
        dispatcher.add_request(1, 5).unwrap();
        dispatcher.add_request(3, 2).unwrap();
        dispatcher.add_request(0, 10).unwrap();

        // Assert
        let report = dispatcher.snapshot();
        assert_eq!(report.up_requests, vec![Request::new(1, 5), Request::new(0, 10)]);
        assert_eq!(report.down_requests, vec![Request::new(3, 2)]);
    }

    #[test]
    fn test_add_invalid_request() {
        // Arrange
        let mut dispatcher = setup_dispatcher();

        // Act & Assert
        for (origin, destination) in [(1, 1), (11, 5), (1, 11), (200, 0)] {
            assert_eq!(
                dispatcher.add_request(origin, destination),
                Err(DispatchError::InvalidRequest {
                    origin: origin.into(),
                    destination: destination.into()
                })
            );
        }
        let report = dispatcher.snapshot();
        assert!(report.up_requests.is_empty());
        assert!(report.down_requests.is_empty());
    }

    #[test]
    fn test_add_request_when_not_running() {
        // Purpose: Requests are refused while out of service or stopping, and nothing is queued

        // Arrange
        let mut dispatcher = Dispatcher::new(11, 8, 5).unwrap();

        // Act & Assert
        assert_eq!(
            dispatcher.add_request(1, 5),
            Err(DispatchError::NotAccepting(SystemStatus::OutOfService))
        );

        dispatcher.start().unwrap();
        dispatcher.stop();
        assert_eq!(
            dispatcher.add_request(1, 5),
            Err(DispatchError::NotAccepting(SystemStatus::Stopping))
        );

        let report = dispatcher.snapshot();
        assert!(report.up_requests.is_empty());
        assert!(report.down_requests.is_empty());
    }

    #[test]
    fn test_invalid_request_checked_before_status() {
        let mut dispatcher = Dispatcher::new(11, 8, 5).unwrap();

        assert_eq!(
            dispatcher.add_request(4, 4),
            Err(DispatchError::InvalidRequest {
                origin: 4,
                destination: 4
            })
        );
    }

    #[test]
    fn test_single_request_end_to_end() {
        // Arrange
        let mut dispatcher = Dispatcher::new(10, 7, 5).unwrap();
        dispatcher.start().unwrap();
        dispatcher.add_request(1, 5).unwrap();

        // Act
        dispatcher.tick();

        // Assert
        let report = dispatcher.snapshot();
        assert!(report.up_requests.is_empty());
        assert_eq!(lit_floors(&report.cars[0].floor_requests), vec![1, 5]);
        for car in &report.cars[1..] {
            assert!(lit_floors(&car.floor_requests).is_empty());
        }
    }

    #[test]
    fn test_batch_is_capacity_bounded() {
        // Purpose: One car at the ground floor takes exactly `capacity` requests, oldest first

        // Arrange
        let mut dispatcher = Dispatcher::new(10, 1, 4).unwrap();
        dispatcher.start().unwrap();
        for (origin, destination) in [(1, 2), (1, 2), (3, 4), (3, 4), (5, 6)] {
            dispatcher.add_request(origin, destination).unwrap();
        }

        // Act
        dispatcher.tick();

        // Assert
        let report = dispatcher.snapshot();
        assert_eq!(report.up_requests, vec![Request::new(5, 6)]);
        assert_eq!(lit_floors(&report.cars[0].floor_requests), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_distribute_multiple_up_requests() {
        // Arrange
        let mut dispatcher = setup_dispatcher();
        for (origin, destination) in [(1, 5), (2, 6), (3, 7), (4, 8), (5, 9), (6, 10)] {
            dispatcher.add_request(origin, destination).unwrap();
        }
        assert_eq!(dispatcher.snapshot().up_requests.len(), 6);

        // Act
        dispatcher.distribute_requests().unwrap();

        // Assert
        let report = dispatcher.snapshot();
        assert!(report.up_requests.is_empty());
        assert_eq!(
            report.cars[0].floor_requests,
            vec![false, true, true, true, true, true, true, true, true, true, false]
        );
        assert_eq!(lit_floors(&report.cars[1].floor_requests), vec![6, 10]);
        assert!(lit_floors(&report.cars[2].floor_requests).is_empty());
    }

    #[test]
    fn test_distribute_multiple_down_requests() {
        // Purpose: Down requests wait until cars patrol up to the top floor

        // Arrange
        let mut dispatcher = setup_dispatcher();
        for (origin, destination) in [(10, 0), (9, 1), (8, 2), (7, 3), (6, 4), (5, 4)] {
            dispatcher.add_request(origin, destination).unwrap();
        }

        // Act
        tick_n(&mut dispatcher, 15);
        assert_eq!(dispatcher.snapshot().down_requests.len(), 6);
        assert!(dispatcher
            .cars()
            .iter()
            .all(|car| car.current_floor() == 10 && car.is_accepting()));
        dispatcher.distribute_requests().unwrap();

        // Assert
        let report = dispatcher.snapshot();
        assert!(report.down_requests.is_empty());
        assert_eq!(
            report.cars[0].floor_requests,
            vec![true, true, true, true, true, false, true, true, true, true, true]
        );
        assert_eq!(lit_floors(&report.cars[1].floor_requests), vec![4, 5]);
    }

    #[test]
    fn test_no_assignment_mid_shaft() {
        // Arrange
        let mut dispatcher = Dispatcher::new(10, 1, 5).unwrap();
        dispatcher.start().unwrap();
        tick_n(&mut dispatcher, 7);
        assert_eq!(dispatcher.cars()[0].current_floor(), 2);

        // Act
        dispatcher.add_request(1, 5).unwrap();
        dispatcher.tick();

        // Assert
        assert_eq!(dispatcher.snapshot().up_requests, vec![Request::new(1, 5)]);
        assert!(!dispatcher.cars()[0].has_stops());
    }

    #[test]
    fn test_distribute_when_not_running() {
        let mut dispatcher = Dispatcher::new(11, 8, 5).unwrap();
        assert_eq!(
            dispatcher.distribute_requests(),
            Err(DispatchError::NotAccepting(SystemStatus::OutOfService))
        );

        dispatcher.start().unwrap();
        dispatcher.stop();
        assert_eq!(
            dispatcher.distribute_requests(),
            Err(DispatchError::NotAccepting(SystemStatus::Stopping))
        );
    }

    #[test]
    fn test_stop() {
        // Arrange
        let mut dispatcher = setup_dispatcher();
        dispatcher.add_request(1, 5).unwrap();
        dispatcher.add_request(5, 1).unwrap();

        // Act
        dispatcher.stop();

        // Assert
        let report = dispatcher.snapshot();
        assert_eq!(report.status, SystemStatus::Stopping);
        assert!(report.up_requests.is_empty());
        assert!(report.down_requests.is_empty());
        assert!(report
            .cars
            .iter()
            .all(|car| car.state == CarState::ReturningToGround && !car.accepting));
    }

    #[test]
    fn test_stop_when_not_running() {
        let mut dispatcher = Dispatcher::new(11, 8, 5).unwrap();
        let before = dispatcher.snapshot();

        dispatcher.stop();

        assert_eq!(dispatcher.snapshot(), before);
    }

    #[test]
    fn test_step_when_stopping() {
        // Purpose: Cars at the top floor reach the ground floor within n_floors - 1 ticks

        // Arrange
        let mut dispatcher = setup_dispatcher();
        tick_n(&mut dispatcher, 15);
        dispatcher.stop();

        // Act & Assert
        dispatcher.tick();
        assert_eq!(dispatcher.snapshot().cars[0].floor, 9);

        tick_n(&mut dispatcher, 8);
        assert_eq!(dispatcher.status(), SystemStatus::Stopping);

        dispatcher.tick();
        let report = dispatcher.snapshot();
        assert_eq!(report.status, SystemStatus::OutOfService);
        assert!(report.cars.iter().all(|car| car.floor == 0 && car.out_of_service));
    }

    #[test]
    fn test_restart_after_stop() {
        // Arrange
        let mut dispatcher = setup_dispatcher();
        dispatcher.stop();
        dispatcher.tick();
        assert_eq!(dispatcher.status(), SystemStatus::OutOfService);

        // Act & Assert
        assert_eq!(dispatcher.start(), Ok(true));
        assert_eq!(dispatcher.status(), SystemStatus::Running);
        assert!(dispatcher.add_request(2, 7).is_ok());
    }

    #[test]
    fn test_stop_with_open_door() {
        // Purpose: A car serving a floor when the system stops abandons the stop at once

        // Arrange
        let mut dispatcher = Dispatcher::new(10, 2, 5).unwrap();
        dispatcher.start().unwrap();
        dispatcher.add_request(3, 6).unwrap();
        tick_n(&mut dispatcher, 4);
        assert_eq!(dispatcher.cars()[0].state(), CarState::DoorOpen);
        assert_eq!(dispatcher.cars()[0].current_floor(), 3);

        // Act
        dispatcher.stop();

        // Assert
        let car = &dispatcher.cars()[0];
        assert_eq!(car.door(), DoorState::Closed);
        assert!(!car.has_stops());

        tick_n(&mut dispatcher, 2);
        assert_eq!(dispatcher.status(), SystemStatus::Stopping);
        dispatcher.tick();
        assert_eq!(dispatcher.status(), SystemStatus::OutOfService);
    }

    #[test]
    fn test_request_round_trip() {
        // Purpose: Both floors of an assigned request are served before the car idles again

        // Arrange
        let mut dispatcher = Dispatcher::new(10, 1, 5).unwrap();
        dispatcher.start().unwrap();
        dispatcher.add_request(2, 6).unwrap();
        let mut served = Vec::new();

        // Act
        for _ in 0..100 {
            dispatcher.tick();
            let car = &dispatcher.cars()[0];
            if car.state() == CarState::DoorOpen && !served.contains(&car.current_floor()) {
                served.push(car.current_floor());
            }
            if car.is_accepting() {
                break;
            }
        }

        // Assert
        let car = &dispatcher.cars()[0];
        assert!(car.is_accepting());
        assert!(!car.has_stops());
        assert_eq!(served, vec![2, 6]);
        assert_eq!(car.current_floor(), 9);
    }

    #[test]
    fn test_tick_when_out_of_service() {
        let mut dispatcher = Dispatcher::new(11, 8, 5).unwrap();
        let before = dispatcher.snapshot();

        tick_n(&mut dispatcher, 3);

        assert_eq!(dispatcher.snapshot(), before);
    }

    #[test]
    fn test_failed_calls_leave_state_unchanged() {
        // Arrange
        let mut dispatcher = setup_dispatcher();
        dispatcher.add_request(1, 5).unwrap();
        let before = dispatcher.snapshot();

        // Act
        let _ = dispatcher.add_request(5, 5);
        let _ = dispatcher.add_request(12, 5);

        // Assert
        assert_eq!(dispatcher.snapshot(), before);
    }
}
