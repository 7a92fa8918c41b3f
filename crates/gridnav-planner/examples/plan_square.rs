use gridnav_planner::AStarPlanner;
use std::collections::HashSet;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Room from (-10, -10) to (60, 60) with a wall at y = 25 spanning x in [20, 30]
    let (mut ox, mut oy) = (Vec::new(), Vec::new());
    for i in -10..=60 {
        let v = i as f64;
        ox.extend([v, v, -10.0, 60.0]);
        oy.extend([-10.0, 60.0, v, v]);
    }
    for x in 20..=30 {
        ox.push(x as f64);
        oy.push(25.0);
    }

    let planner = AStarPlanner::new(&ox, &oy, 2.0, 1.0)?;
    let (sx, sy, gx, gy) = (0.0, 0.0, 50.0, 50.0);

    let result = planner.plan(sx, sy, gx, gy)?;
    println!("{result}");

    let Some(path) = result.into_path() else {
        println!("\nNo path found.");
        return Ok(());
    };

    println!("\nPath found with {} waypoints (goal first):", path.len());
    println!("{path}");
    println!("World length: {:.3}", path.world_length());

    let bounds = *planner.bounds();
    let cells: HashSet<(i64, i64)> = path
        .points()
        .map(|(x, y)| Ok((bounds.x_index(x)?, bounds.y_index(y)?)))
        .collect::<Result<_, gridnav_planner::PlannerError>>()?;
    let start = (bounds.x_index(sx)?, bounds.y_index(sy)?);
    let goal = (bounds.x_index(gx)?, bounds.y_index(gy)?);

    println!("\nGrid with path:");
    let map = planner.obstacle_map();
    for y in (0..bounds.y_width).rev() {
        let row: String = (0..bounds.x_width)
            .map(|x| {
                if (x, y) == start {
                    'S'
                } else if (x, y) == goal {
                    'G'
                } else if cells.contains(&(x, y)) {
                    '*'
                } else if map.is_occupied(x, y) {
                    '#'
                } else {
                    '.'
                }
            })
            .collect();
        println!("{row}");
    }

    Ok(())
}
